//! Term extraction: reads one quoted string literal.
//!
//! A term is `"` followed by any characters other than `"`, then `"`.
//! There are no escape sequences; the first quote after the opening one
//! always closes the term.
//!
//! Positions and consumed lengths are byte offsets. Every delimiter is
//! ASCII, so scanning bytes never splits a multi-byte character.

use crate::{Error, Result};

pub(crate) const QUOTE: u8 = b'"';

/// Extract the quoted term that starts at byte `pos` of `text`.
///
/// Returns the unquoted content and the number of bytes consumed, which is
/// always `content.len() + 2`.
///
/// # Errors
/// - `MalformedTerm` if `text[pos]` is not `"`
/// - `UnterminatedTerm` if the input ends before the closing quote
///
/// # Example
/// ```
/// use ordmap_core::parser::extract_term;
///
/// assert_eq!(extract_term(r#""hi","x""#, 0).unwrap(), ("hi", 4));
/// ```
pub fn extract_term(text: &str, pos: usize) -> Result<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&QUOTE) {
        return Err(Error::MalformedTerm {
            offset: pos,
            found: char_at(text, pos),
        });
    }

    let start = pos + 1;
    match bytes[start..].iter().position(|&b| b == QUOTE) {
        Some(len) => Ok((&text[start..start + len], len + 2)),
        None => Err(Error::UnterminatedTerm { offset: pos }),
    }
}

/// The character starting at byte `pos`, if `pos` is a char boundary
/// inside `text`.
pub(crate) fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|rest| rest.chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term() {
        assert_eq!(extract_term(r#""""#, 0).unwrap(), ("", 2));
    }

    #[test]
    fn test_simple_term() {
        assert_eq!(extract_term(r#""hi""#, 0).unwrap(), ("hi", 4));
    }

    #[test]
    fn test_term_at_offset() {
        let text = r#"{"name":"Alice"}"#;
        assert_eq!(extract_term(text, 1).unwrap(), ("name", 6));
        assert_eq!(extract_term(text, 8).unwrap(), ("Alice", 7));
    }

    #[test]
    fn test_term_stops_at_first_quote() {
        assert_eq!(extract_term(r#""ab"cd""#, 0).unwrap(), ("ab", 4));
    }

    #[test]
    fn test_term_is_literal() {
        // Backslashes and structural characters are plain content
        assert_eq!(extract_term(r#""a\n{,:}""#, 0).unwrap(), (r"a\n{,:}", 9));
    }

    #[test]
    fn test_term_multibyte() {
        let (content, consumed) = extract_term("\"héllo ✓\"", 0).unwrap();
        assert_eq!(content, "héllo ✓");
        assert_eq!(consumed, content.len() + 2);
    }

    #[test]
    fn test_unterminated_term() {
        assert_eq!(
            extract_term(r#""hi"#, 0),
            Err(Error::UnterminatedTerm { offset: 0 })
        );
    }

    #[test]
    fn test_lone_quote_is_unterminated() {
        assert_eq!(
            extract_term(r#"""#, 0),
            Err(Error::UnterminatedTerm { offset: 0 })
        );
    }

    #[test]
    fn test_missing_opening_quote() {
        assert_eq!(
            extract_term("hi\"", 0),
            Err(Error::MalformedTerm {
                offset: 0,
                found: Some('h')
            })
        );
    }

    #[test]
    fn test_position_past_end() {
        assert_eq!(
            extract_term(r#""a""#, 3),
            Err(Error::MalformedTerm {
                offset: 3,
                found: None
            })
        );
    }

    #[test]
    fn test_consumed_length_invariant() {
        for content in ["", "a", "hello world", "30", "ünï"] {
            let text = format!("\"{}\"", content);
            let (got, consumed) = extract_term(&text, 0).unwrap();
            assert_eq!(got, content);
            assert_eq!(consumed, content.len() + 2);
        }
    }
}
