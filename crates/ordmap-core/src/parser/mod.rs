//! Parser — recursive descent reader for the ordmap text form
//!
//! ```text
//! object  ::= '{' ( pair ( ',' pair )* )? '}'
//! pair    ::= string ':' value
//! value   ::= string | object
//! string  ::= '"' char* '"'
//! ```
//!
//! Matching is exact at the byte level: no whitespace is allowed between
//! tokens. Every step returns how many bytes it consumed instead of moving a
//! shared cursor, so parse calls are independent and reentrant.
//!
//! Any failure aborts the whole parse; no partial map is returned.

pub mod term;

pub use term::extract_term;

use crate::limits::Limits;
use crate::map::{OrderedMap, Value};
use crate::{Error, Result};

use term::{char_at, QUOTE};

/// Parse the object starting at byte `pos` of `text` with default limits.
///
/// Returns the map and the number of bytes consumed, including both braces.
///
/// # Example
/// ```
/// use ordmap_core::parser::parse_object;
///
/// let (map, consumed) = parse_object(r#"x={"a":"1"};"#, 2).unwrap();
/// assert_eq!(map.get("a").and_then(|v| v.as_leaf()), Some("1"));
/// assert_eq!(consumed, 9);
/// ```
pub fn parse_object(text: &str, pos: usize) -> Result<(OrderedMap, usize)> {
    parse_object_with_limits(text, pos, &Limits::default())
}

/// Parse the object starting at byte `pos` of `text` under `limits`.
pub fn parse_object_with_limits(
    text: &str,
    pos: usize,
    limits: &Limits,
) -> Result<(OrderedMap, usize)> {
    if text.len() > limits.max_input_len {
        return Err(Error::InputTooLarge {
            len: text.len(),
            limit: limits.max_input_len,
        });
    }
    Parser { text, limits }.object(pos, 1)
}

/// Parse `text` from its first byte with default limits.
///
/// Bytes after the closing brace of the object are ignored; use
/// [`parse_complete`] to reject them.
pub fn parse(text: &str) -> Result<OrderedMap> {
    parse_with_limits(text, &Limits::default())
}

/// Parse `text` from its first byte under `limits`.
pub fn parse_with_limits(text: &str, limits: &Limits) -> Result<OrderedMap> {
    parse_object_with_limits(text, 0, limits).map(|(map, _)| map)
}

/// Parse `text` and require the object to span all of it.
pub fn parse_complete(text: &str) -> Result<OrderedMap> {
    parse_complete_with_limits(text, &Limits::default())
}

/// Parse `text` under `limits` and require the object to span all of it.
pub fn parse_complete_with_limits(text: &str, limits: &Limits) -> Result<OrderedMap> {
    let (map, consumed) = parse_object_with_limits(text, 0, limits)?;
    if consumed != text.len() {
        return Err(Error::TrailingCharacters { offset: consumed });
    }
    Ok(map)
}

struct Parser<'a> {
    text: &'a str,
    limits: &'a Limits,
}

impl<'a> Parser<'a> {
    fn peek(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    fn found(&self, pos: usize) -> Option<char> {
        char_at(self.text, pos)
    }

    /// Parse one object at `pos`; `depth` is 1 for the outermost object.
    fn object(&self, pos: usize, depth: usize) -> Result<(OrderedMap, usize)> {
        if self.peek(pos) != Some(b'{') {
            return Err(Error::ExpectedObjectStart {
                offset: pos,
                found: self.found(pos),
            });
        }
        if depth > self.limits.max_depth {
            return Err(Error::NestingTooDeep {
                offset: pos,
                depth,
                limit: self.limits.max_depth,
            });
        }

        let mut map = OrderedMap::new();
        let mut cursor = pos + 1;

        if self.peek(cursor) == Some(b'}') {
            return Ok((map, 2));
        }

        loop {
            // ── Key ────────────────────────────────────────
            let (key, used) = self.term(cursor)?;
            cursor += used;

            // ── Colon ──────────────────────────────────────
            if self.peek(cursor) != Some(b':') {
                return Err(Error::ExpectedColon {
                    offset: cursor,
                    found: self.found(cursor),
                });
            }
            cursor += 1;

            // ── Value ──────────────────────────────────────
            let (value, used) = match self.peek(cursor) {
                Some(b'{') => {
                    let (nested, used) = self.object(cursor, depth + 1)?;
                    (Value::Nested(nested), used)
                }
                Some(QUOTE) => {
                    let (leaf, used) = self.term(cursor)?;
                    (Value::Leaf(leaf.to_string()), used)
                }
                _ => {
                    return Err(Error::UnsupportedValueType {
                        offset: cursor,
                        found: self.found(cursor),
                    })
                }
            };
            cursor += used;

            map.put(key, value);
            if map.len() > self.limits.max_entries {
                return Err(Error::TooManyEntries {
                    offset: pos,
                    limit: self.limits.max_entries,
                });
            }

            // ── Separator or close ─────────────────────────
            match self.peek(cursor) {
                Some(b',') => cursor += 1,
                Some(b'}') => return Ok((map, cursor + 1 - pos)),
                _ => {
                    return Err(Error::MalformedObjectStructure {
                        offset: cursor,
                        found: self.found(cursor),
                    })
                }
            }
        }
    }

    fn term(&self, pos: usize) -> Result<(&'a str, usize)> {
        let (content, used) = extract_term(self.text, pos)?;
        if content.len() > self.limits.max_term_len {
            return Err(Error::TermTooLong {
                offset: pos,
                len: content.len(),
                limit: self.limits.max_term_len,
            });
        }
        Ok((content, used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf<'m>(map: &'m OrderedMap, key: &str) -> Option<&'m str> {
        map.get(key).and_then(Value::as_leaf)
    }

    // ── Well-formed input ──────────────────────────────

    #[test]
    fn test_parse_flat_object() {
        let text = r#"{"name":"Alice","age":"30"}"#;
        let (map, consumed) = parse_object(text, 0).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(leaf(&map, "name"), Some("Alice"));
        assert_eq!(leaf(&map, "age"), Some("30"));
        assert_eq!(consumed, text.len());
    }

    #[test]
    fn test_parse_nested_object() {
        let map = parse(r#"{"user":{"name":"Bob"}}"#).unwrap();
        let user = map.get("user").and_then(Value::as_map).unwrap();
        assert_eq!(user.len(), 1);
        assert_eq!(leaf(user, "name"), Some("Bob"));
    }

    #[test]
    fn test_parse_deeply_nested_consumed() {
        let text = r#"{"a":{"b":{"c":"d"}},"e":"f"}"#;
        let (map, consumed) = parse_object(text, 0).unwrap();
        assert_eq!(consumed, text.len());
        assert_eq!(
            map.get_path(&["a", "b", "c"]).and_then(Value::as_leaf),
            Some("d")
        );
        assert_eq!(leaf(&map, "e"), Some("f"));
    }

    #[test]
    fn test_parse_empty_object() {
        let (map, consumed) = parse_object("{}", 0).unwrap();
        assert!(map.is_empty());
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_parse_empty_nested_object() {
        let map = parse(r#"{"inner":{},"x":"1"}"#).unwrap();
        assert!(map.get("inner").and_then(Value::as_map).unwrap().is_empty());
        assert_eq!(leaf(&map, "x"), Some("1"));
    }

    #[test]
    fn test_parse_empty_strings() {
        let map = parse(r#"{"":""}"#).unwrap();
        assert_eq!(leaf(&map, ""), Some(""));
    }

    #[test]
    fn test_parse_duplicate_key_overwrites_in_place() {
        let map = parse(r#"{"b":"1","a":"2","b":"3"}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(leaf(&map, "b"), Some("3"));
    }

    #[test]
    fn test_parse_at_offset_ignores_surroundings() {
        let text = r#"prefix{"k":"v"}suffix"#;
        let (map, consumed) = parse_object(text, 6).unwrap();
        assert_eq!(leaf(&map, "k"), Some("v"));
        assert_eq!(consumed, 9);
    }

    #[test]
    fn test_parse_ignores_trailing() {
        let map = parse(r#"{"k":"v"} trailing"#).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_complete_rejects_trailing() {
        assert_eq!(
            parse_complete(r#"{"k":"v"}x"#),
            Err(Error::TrailingCharacters { offset: 9 })
        );
        assert!(parse_complete(r#"{"k":"v"}"#).is_ok());
    }

    #[test]
    fn test_parse_multibyte_content() {
        let map = parse(r#"{"città":"Zürich ✓"}"#).unwrap();
        assert_eq!(leaf(&map, "città"), Some("Zürich ✓"));
    }

    // ── Malformed input ────────────────────────────────

    #[test]
    fn test_missing_open_brace() {
        assert_eq!(
            parse(r#""a":"1"}"#),
            Err(Error::ExpectedObjectStart {
                offset: 0,
                found: Some('"')
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse(""),
            Err(Error::ExpectedObjectStart {
                offset: 0,
                found: None
            })
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            parse(r#"{"a" "1"}"#),
            Err(Error::ExpectedColon {
                offset: 4,
                found: Some(' ')
            })
        );
    }

    #[test]
    fn test_unsupported_bare_number() {
        assert_eq!(
            parse(r#"{"a":1}"#),
            Err(Error::UnsupportedValueType {
                offset: 5,
                found: Some('1')
            })
        );
    }

    #[test]
    fn test_unsupported_array_and_literals() {
        for text in [r#"{"a":[]}"#, r#"{"a":true}"#, r#"{"a":null}"#] {
            assert!(
                matches!(parse(text), Err(Error::UnsupportedValueType { offset: 5, .. })),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_unquoted_key() {
        assert_eq!(
            parse(r#"{a:"1"}"#),
            Err(Error::MalformedTerm {
                offset: 1,
                found: Some('a')
            })
        );
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(
            parse(r#"{"a":"1",}"#),
            Err(Error::MalformedTerm {
                offset: 9,
                found: Some('}')
            })
        );
    }

    #[test]
    fn test_whitespace_not_permitted() {
        assert!(matches!(
            parse(r#"{ "a":"1"}"#),
            Err(Error::MalformedTerm { offset: 1, .. })
        ));
        assert!(matches!(
            parse(r#"{"a": "1"}"#),
            Err(Error::UnsupportedValueType { offset: 5, .. })
        ));
        assert!(matches!(
            parse(r#"{"a":"1" }"#),
            Err(Error::MalformedObjectStructure { offset: 8, .. })
        ));
    }

    #[test]
    fn test_bad_separator() {
        assert_eq!(
            parse(r#"{"a":"1";"b":"2"}"#),
            Err(Error::MalformedObjectStructure {
                offset: 8,
                found: Some(';')
            })
        );
    }

    #[test]
    fn test_unterminated_value() {
        assert_eq!(
            parse(r#"{"a":"1"#),
            Err(Error::UnterminatedTerm { offset: 5 })
        );
    }

    #[test]
    fn test_premature_end_of_input() {
        assert_eq!(
            parse(r#"{"a""#),
            Err(Error::ExpectedColon {
                offset: 4,
                found: None
            })
        );
        assert_eq!(
            parse(r#"{"a":"#),
            Err(Error::UnsupportedValueType {
                offset: 5,
                found: None
            })
        );
        assert_eq!(
            parse(r#"{"a":"1""#),
            Err(Error::MalformedObjectStructure {
                offset: 8,
                found: None
            })
        );
        assert_eq!(
            parse("{"),
            Err(Error::MalformedTerm {
                offset: 1,
                found: None
            })
        );
    }

    #[test]
    fn test_nested_failure_propagates() {
        assert_eq!(
            parse(r#"{"outer":{"inner" "x"}}"#),
            Err(Error::ExpectedColon {
                offset: 17,
                found: Some(' ')
            })
        );
    }

    // ── Limits ─────────────────────────────────────────

    #[test]
    fn test_input_too_large() {
        let limits = Limits {
            max_input_len: 4,
            ..Limits::strict()
        };
        assert_eq!(
            parse_with_limits(r#"{"a":"1"}"#, &limits),
            Err(Error::InputTooLarge { len: 9, limit: 4 })
        );
    }

    #[test]
    fn test_nesting_too_deep() {
        let limits = Limits {
            max_depth: 2,
            ..Limits::strict()
        };
        assert!(parse_with_limits(r#"{"a":{"b":"c"}}"#, &limits).is_ok());
        assert_eq!(
            parse_with_limits(r#"{"a":{"b":{"c":"d"}}}"#, &limits),
            Err(Error::NestingTooDeep {
                offset: 10,
                depth: 3,
                limit: 2
            })
        );
    }

    #[test]
    fn test_default_limits_stop_runaway_nesting() {
        let mut text = String::new();
        for _ in 0..1000 {
            text.push_str(r#"{"k":"#);
        }
        assert!(matches!(
            parse(&text),
            Err(Error::NestingTooDeep { depth: 33, .. })
        ));
    }

    #[test]
    fn test_term_too_long() {
        let limits = Limits {
            max_term_len: 3,
            ..Limits::strict()
        };
        assert_eq!(
            parse_with_limits(r#"{"a":"abcd"}"#, &limits),
            Err(Error::TermTooLong {
                offset: 5,
                len: 4,
                limit: 3
            })
        );
    }

    #[test]
    fn test_too_many_entries() {
        let limits = Limits {
            max_entries: 2,
            ..Limits::strict()
        };
        assert!(parse_with_limits(r#"{"a":"1","b":"2"}"#, &limits).is_ok());
        // Overwriting a key does not add an entry
        assert!(parse_with_limits(r#"{"a":"1","b":"2","a":"3"}"#, &limits).is_ok());
        assert_eq!(
            parse_with_limits(r#"{"a":"1","b":"2","c":"3"}"#, &limits),
            Err(Error::TooManyEntries {
                offset: 0,
                limit: 2
            })
        );
    }

    // ── Round-trip & determinism ───────────────────────

    #[test]
    fn test_round_trip() {
        let mut inner = OrderedMap::new();
        inner.put("city", "Hanoi");
        inner.put("empty", OrderedMap::new());
        let mut map = OrderedMap::new();
        map.put("name", "Alice");
        map.put("address", inner);
        map.put("age", "30");

        let text = crate::serialize(&map);
        let parsed = parse_complete(&text).unwrap();
        assert_eq!(
            parsed.keys().collect::<Vec<_>>(),
            vec!["name", "address", "age"]
        );
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_reordered_text_is_not_equal() {
        let ab: OrderedMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let parsed = parse(r#"{"b":"2","a":"1"}"#).unwrap();
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_ne!(parsed, ab);
        assert_eq!(parse(r#"{"a":"1","b":"2"}"#).unwrap(), ab);
    }

    #[test]
    fn test_empty_map_round_trip() {
        let empty = OrderedMap::new();
        assert_eq!(parse(&crate::serialize(&empty)).unwrap(), empty);
    }

    #[test]
    fn test_parse_determinism_100_iterations() {
        let text = r#"{"id":"7","user":{"name":"Bob","tags":{"a":"1"}}}"#;
        let first = parse_object(text, 0).unwrap();
        for i in 0..100 {
            assert_eq!(
                first,
                parse_object(text, 0).unwrap(),
                "Determinism failure at iteration {}",
                i
            );
        }
    }
}
