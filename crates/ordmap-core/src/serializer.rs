//! Serializer — renders an OrderedMap to its text form
//!
//! ```text
//! object  ::= '{' ( pair ( ',' pair )* )? '}'
//! pair    ::= string ':' value
//! value   ::= string | object
//! ```
//!
//! Every Leaf is quoted, nested maps are written inline, and entries appear
//! in insertion order. Serialization cannot fail and never mutates the map.
//! Content is written verbatim: a leaf containing `"` produces text the
//! parser will not read back. [`try_serialize`] refuses such maps instead.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::map::{OrderedMap, Value};

/// Serialize `map` to text.
///
/// # Example
/// ```
/// use ordmap_core::{serialize, OrderedMap};
///
/// let mut map = OrderedMap::new();
/// assert_eq!(serialize(&map), "{}");
///
/// map.put("age", "30");
/// assert_eq!(serialize(&map), r#"{"age":"30"}"#);
/// ```
pub fn serialize(map: &OrderedMap) -> String {
    let mut out = String::new();
    serialize_into(map, &mut out);
    out
}

/// Append the text form of `map` to `out`.
pub fn serialize_into(map: &OrderedMap, out: &mut String) {
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_term(out, key);
        out.push(':');
        match value {
            Value::Leaf(text) => write_term(out, text),
            Value::Nested(nested) => serialize_into(nested, out),
        }
    }
    out.push('}');
}

/// Serialize `map`, failing if any key or leaf contains `"`.
///
/// Text produced this way always parses back to an equal map.
pub fn try_serialize(map: &OrderedMap) -> Result<String> {
    check_terms(map)?;
    Ok(serialize(map))
}

fn check_terms(map: &OrderedMap) -> Result<()> {
    for (key, value) in map {
        check_term(key)?;
        match value {
            Value::Leaf(text) => check_term(text)?,
            Value::Nested(nested) => check_terms(nested)?,
        }
    }
    Ok(())
}

fn check_term(text: &str) -> Result<()> {
    if text.contains('"') {
        return Err(Error::UnencodableTerm {
            term: text.to_string(),
        });
    }
    Ok(())
}

fn write_term(out: &mut String, text: &str) {
    out.push('"');
    out.push_str(text);
    out.push('"');
}

/// Compute the SHA-256 fingerprint of a map's text form, as lower-case hex.
///
/// Maps with the same entries in the same order share a fingerprint.
pub fn fingerprint(map: &OrderedMap) -> String {
    let mut hasher = Sha256::new();
    hasher.update(serialize(map).as_bytes());
    format!("{:x}", hasher.finalize())
}
