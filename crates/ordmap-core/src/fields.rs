//! Field collection — populating an OrderedMap from structured values
//!
//! Types opt in by implementing [`FieldCollector`] and reporting their
//! fields, in order, to a [`Fields`] sink. Primitive-ish values are stored
//! as their text; a structured field is collected recursively and stored
//! as a Leaf holding the nested map's serialized text.

use crate::map::{OrderedMap, Value};
use crate::{Error, Result};

/// Capability to enumerate a value's named fields.
///
/// Implementations must be deterministic and must not report the same
/// field name twice.
pub trait FieldCollector {
    fn collect_fields<'a>(&'a self, out: &mut Fields<'a>);
}

enum FieldValue<'a> {
    Text(String),
    Record(&'a dyn FieldCollector),
}

/// Ordered sink of `(name, value)` pairs reported by a [`FieldCollector`]
pub struct Fields<'a> {
    entries: Vec<(String, FieldValue<'a>)>,
}

impl<'a> Fields<'a> {
    fn new() -> Self {
        Fields {
            entries: Vec::new(),
        }
    }

    /// Report a primitive-ish field, kept as its text form.
    pub fn text(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.entries
            .push((name.to_string(), FieldValue::Text(value.to_string())));
        self
    }

    /// Report a structured field, converted recursively.
    pub fn record(&mut self, name: &str, value: &'a dyn FieldCollector) -> &mut Self {
        self.entries
            .push((name.to_string(), FieldValue::Record(value)));
        self
    }
}

impl OrderedMap {
    /// Build a map from the fields `value` reports.
    ///
    /// # Errors
    /// Returns `DuplicateField` if any collector, at any level, reports a
    /// name twice.
    ///
    /// # Example
    /// ```
    /// use ordmap_core::{FieldCollector, Fields, OrderedMap};
    ///
    /// struct Point { x: i32, y: i32 }
    ///
    /// impl FieldCollector for Point {
    ///     fn collect_fields<'a>(&'a self, out: &mut Fields<'a>) {
    ///         out.text("x", self.x).text("y", self.y);
    ///     }
    /// }
    ///
    /// let map = OrderedMap::from_fields(&Point { x: 1, y: -2 }).unwrap();
    /// assert_eq!(map.to_string(), r#"{"x":"1","y":"-2"}"#);
    /// ```
    pub fn from_fields(value: &dyn FieldCollector) -> Result<OrderedMap> {
        let mut fields = Fields::new();
        value.collect_fields(&mut fields);

        let mut map = OrderedMap::with_capacity(fields.entries.len());
        for (name, field) in fields.entries {
            if map.contains_key(&name) {
                return Err(Error::DuplicateField { name });
            }
            let leaf = match field {
                FieldValue::Text(text) => text,
                FieldValue::Record(nested) => OrderedMap::from_fields(nested)?.to_string(),
            };
            map.put(name, Value::Leaf(leaf));
        }
        Ok(map)
    }
}
