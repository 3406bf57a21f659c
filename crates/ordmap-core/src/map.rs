//! OrderedMap: insertion-ordered string map whose values are text leaves
//! or nested maps.
//!
//! Re-inserting an existing key replaces its value but keeps its original
//! position. Equality is order-sensitive: two maps are equal only when they
//! hold the same entries in the same order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A map value: either quoted text or a nested map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Leaf(String),
    Nested(OrderedMap),
}

impl Value {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Value::Leaf(_))
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Value::Nested(_))
    }

    /// Returns the text if this is a Leaf, None otherwise.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Value::Leaf(s) => Some(s),
            Value::Nested(_) => None,
        }
    }

    /// Returns the nested map if this is Nested, None otherwise.
    pub fn as_map(&self) -> Option<&OrderedMap> {
        match self {
            Value::Nested(m) => Some(m),
            Value::Leaf(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Leaf(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Leaf(s)
    }
}

impl From<OrderedMap> for Value {
    fn from(m: OrderedMap) -> Self {
        Value::Nested(m)
    }
}

/// Insertion-ordered mapping from string keys to [`Value`]s.
///
/// ```
/// use ordmap_core::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.put("b", "1");
/// map.put("a", "2");
/// map.put("b", "3");
///
/// let keys: Vec<&str> = map.keys().collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(map.get("b").and_then(|v| v.as_leaf()), Some("3"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedMap(IndexMap<String, Value>);

// IndexMap equality ignores order; compare entry by entry instead.
impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for OrderedMap {}

impl OrderedMap {
    pub fn new() -> Self {
        OrderedMap(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap(IndexMap::with_capacity(capacity))
    }

    /// Insert or overwrite `key`.
    ///
    /// Returns the displaced value when the key was already present; the key
    /// keeps its first-insertion position either way.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Walk nested maps along `path`.
    ///
    /// An empty path, a missing key, or a Leaf in the middle of the path all
    /// yield `None`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut map = self;
        for key in parents {
            map = map.get(key)?.as_map()?;
        }
        map.get(last)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.0.values()
    }
}

/// Borrowing iterator over `(key, value)` in insertion order
#[derive(Debug, Clone)]
pub struct Iter<'a>(indexmap::map::Iter<'a, String, Value>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for OrderedMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for OrderedMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.put(k, v);
        }
        map
    }
}

impl fmt::Display for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&crate::serializer::serialize(self))
    }
}
