//! Error types for ordmap
//!
//! All fallible operations return `Result<T, Error>`.
//! Parse errors carry the byte offset where they were detected and the
//! character found there, so malformed input can be diagnosed.

use thiserror::Error;

/// ordmap error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input at the expected position does not begin with `{`
    #[error("expected '{{' at offset {offset}, found {}", describe(.found))]
    ExpectedObjectStart { offset: usize, found: Option<char> },

    /// A string literal does not begin with a quote where one is required
    #[error("expected opening quote at offset {offset}, found {}", describe(.found))]
    MalformedTerm { offset: usize, found: Option<char> },

    /// A string literal's closing quote is missing before input ends
    #[error("unterminated term starting at offset {offset}")]
    UnterminatedTerm { offset: usize },

    /// A key is not followed by `:`
    #[error("expected ':' after key at offset {offset}, found {}", describe(.found))]
    ExpectedColon { offset: usize, found: Option<char> },

    /// A value is neither a nested object nor a quoted string
    #[error("unsupported value type at offset {offset}, found {}", describe(.found))]
    UnsupportedValueType { offset: usize, found: Option<char> },

    /// After a value, the next character is neither `,` nor `}`
    #[error("expected ',' or '}}' at offset {offset}, found {}", describe(.found))]
    MalformedObjectStructure { offset: usize, found: Option<char> },

    /// Input continues past the closing brace of the top-level object
    #[error("trailing characters after object at offset {offset}")]
    TrailingCharacters { offset: usize },

    #[error("input too large: {len} bytes exceeds limit of {limit}")]
    InputTooLarge { len: usize, limit: usize },

    #[error("nesting too deep at offset {offset}: depth {depth} exceeds limit of {limit}")]
    NestingTooDeep {
        offset: usize,
        depth: usize,
        limit: usize,
    },

    #[error("term at offset {offset} too long: {len} bytes exceeds limit of {limit}")]
    TermTooLong {
        offset: usize,
        len: usize,
        limit: usize,
    },

    #[error("object at offset {offset} has more than {limit} entries")]
    TooManyEntries { offset: usize, limit: usize },

    /// A key or leaf contains `"`, which the text form cannot carry
    #[error("term {term:?} contains '\"' and cannot be written as text")]
    UnencodableTerm { term: String },

    /// A field collector reported the same field name twice
    #[error("duplicate field '{name}'")]
    DuplicateField { name: String },
}

impl Error {
    /// Byte offset in the input where the error was detected, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::ExpectedObjectStart { offset, .. }
            | Error::MalformedTerm { offset, .. }
            | Error::UnterminatedTerm { offset }
            | Error::ExpectedColon { offset, .. }
            | Error::UnsupportedValueType { offset, .. }
            | Error::MalformedObjectStructure { offset, .. }
            | Error::TrailingCharacters { offset }
            | Error::NestingTooDeep { offset, .. }
            | Error::TermTooLong { offset, .. }
            | Error::TooManyEntries { offset, .. } => Some(*offset),
            Error::InputTooLarge { .. }
            | Error::UnencodableTerm { .. }
            | Error::DuplicateField { .. } => None,
        }
    }

    /// Returns true for errors raised by the grammar itself rather than by a limit
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::ExpectedObjectStart { .. }
                | Error::MalformedTerm { .. }
                | Error::UnterminatedTerm { .. }
                | Error::ExpectedColon { .. }
                | Error::UnsupportedValueType { .. }
                | Error::MalformedObjectStructure { .. }
                | Error::TrailingCharacters { .. }
        )
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}

/// Result type alias for ordmap operations
pub type Result<T> = std::result::Result<T, Error>;
