//! Resource limits for parsing.
//!
//! Parsing recurses once per nesting level, so untrusted input must be
//! bounded. `Limits` caps total input size, nesting depth, term length and
//! entries per object.

/// Resource limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_len: usize,
    /// Maximum object nesting depth (the top-level object is depth 1)
    pub max_depth: usize,
    /// Maximum length of a single key or leaf, in bytes
    pub max_term_len: usize,
    /// Maximum number of distinct keys in one object
    pub max_entries: usize,
}

impl Limits {
    /// Default limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_len: 1024 * 1024, // 1 MiB
            max_depth: 32,
            max_term_len: 64 * 1024, // 64 KiB
            max_entries: 1024,
        }
    }

    /// Lenient limits for trusted, larger documents.
    pub const fn lenient() -> Self {
        Self {
            max_input_len: 16 * 1024 * 1024, // 16 MiB
            max_depth: 128,
            max_term_len: 1024 * 1024, // 1 MiB
            max_entries: 10_000,
        }
    }

    /// No limits at all. Deeply nested input can exhaust the stack.
    pub const fn unbounded() -> Self {
        Self {
            max_input_len: usize::MAX,
            max_depth: usize::MAX,
            max_term_len: usize::MAX,
            max_entries: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert_eq!(Limits::default(), Limits::strict());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert_eq!(limits.max_input_len, 1024 * 1024);
        assert_eq!(limits.max_depth, 32);
        assert_eq!(limits.max_term_len, 64 * 1024);
        assert_eq!(limits.max_entries, 1024);
    }

    #[test]
    fn test_lenient_exceeds_strict() {
        let strict = Limits::strict();
        let lenient = Limits::lenient();
        assert!(lenient.max_input_len > strict.max_input_len);
        assert!(lenient.max_depth > strict.max_depth);
        assert!(lenient.max_term_len > strict.max_term_len);
        assert!(lenient.max_entries > strict.max_entries);
    }
}
