//! C-FFI layer for ordmap — used by C, Go (cgo) and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `ordmap-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `ordmap_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use ordmap_core::OrderedMap;

/// Result from an ordmap FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `ordmap_free_string()`.
#[repr(C)]
pub struct OrdmapResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

impl OrdmapResult {
    fn ok(value: String) -> Self {
        match CString::new(value) {
            Ok(c) => OrdmapResult {
                result: c.into_raw(),
                error: std::ptr::null_mut(),
            },
            Err(_) => Self::err("output contains an interior NUL byte".into()),
        }
    }

    fn err(msg: String) -> Self {
        let c = CString::new(msg.replace('\0', " ")).unwrap_or_default();
        OrdmapResult {
            result: std::ptr::null_mut(),
            error: c.into_raw(),
        }
    }
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Parse ordmap text and return it as a JSON object string.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `ordmap_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn ordmap_parse_to_json(text: *const c_char) -> OrdmapResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return OrdmapResult::err("null or invalid UTF-8 input".into()),
    };

    match ordmap_core::parse_complete(text) {
        Ok(map) => match serde_json::to_string(&map) {
            Ok(json) => OrdmapResult::ok(json),
            Err(e) => OrdmapResult::err(format!("Serialization error: {}", e)),
        },
        Err(e) => OrdmapResult::err(e.to_string()),
    }
}

/// Convert a JSON object holding only strings and objects to ordmap text.
///
/// Fails when a key or string contains `"`, which the text form cannot carry.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `ordmap_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn ordmap_json_to_text(json: *const c_char) -> OrdmapResult {
    let json = match cstr_to_str(json) {
        Some(s) => s,
        None => return OrdmapResult::err("null or invalid UTF-8 input".into()),
    };

    match serde_json::from_str::<OrderedMap>(json) {
        Ok(map) => match ordmap_core::try_serialize(&map) {
            Ok(text) => OrdmapResult::ok(text),
            Err(e) => OrdmapResult::err(e.to_string()),
        },
        Err(e) => OrdmapResult::err(format!("Unsupported JSON: {}", e)),
    }
}

/// Compute the SHA-256 fingerprint of ordmap text.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `ordmap_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn ordmap_fingerprint(text: *const c_char) -> OrdmapResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return OrdmapResult::err("null or invalid UTF-8 input".into()),
    };

    match ordmap_core::parse_complete(text) {
        Ok(map) => OrdmapResult::ok(ordmap_core::fingerprint(&map)),
        Err(e) => OrdmapResult::err(e.to_string()),
    }
}

/// Free a string previously returned by an ordmap FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by an ordmap FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn ordmap_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
