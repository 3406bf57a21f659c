//! ordmap core - insertion-ordered string map and its text form
//!
//! A map holds string keys in first-insertion order; every value is either
//! a text leaf or a nested map. The map serializes to a restricted
//! JSON-like text and parses that same text back.
//!
//! # Architecture
//!
//! ```text
//! FieldCollector → OrderedMap → Serializer → text
//!                      ↑
//! text → Parser (term extraction, recursion per nested object)
//! ```
//!
//! # Format
//!
//! ```text
//! object  ::= '{' ( pair ( ',' pair )* )? '}'
//! pair    ::= string ':' value
//! value   ::= string | object
//! string  ::= '"' char* '"'        # no '"' inside, no escapes
//! ```
//!
//! There are no arrays, numbers, booleans or nulls, and no whitespace
//! between tokens.
//!
//! # Guarantees
//!
//! - **Deterministic**: serializing and parsing are pure functions
//! - **Order preserving**: `parse(serialize(m)) == m` for content free of `"`
//! - **Reentrant**: every step returns its consumed length; there is no shared cursor
//! - **Bounded**: parsing honors [`Limits`] on size, depth, term length and entries

pub mod error;
pub mod fields;
pub mod limits;
pub mod map;
pub mod order;
pub mod parser;
pub mod serializer;

pub use error::{Error, Result};
pub use fields::{FieldCollector, Fields};
pub use limits::Limits;
pub use map::{OrderedMap, Value};
pub use parser::{parse, parse_complete, parse_object, parse_with_limits};
pub use serializer::{fingerprint, serialize, try_serialize};

/// Version of the ordmap-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
