//! Ordered map type for SHON objects.
//!
//! [`ShonMap`] wraps [`IndexMap`] so that "insertion order is preserved" is a
//! structural guarantee of the object model rather than an accident of map
//! iteration. The serializer's alphabetical mode is a *view* at render time;
//! the map itself is never reordered.
//!
//! The map also stores the comments anchored to each entry. The parser
//! deposits any comments that preceded a key here, and the serializer
//! re-emits them in front of that key (unless minifying). Comments are part
//! of equality: a reformat that preserves comments reparses to an equal map.
//!
//! ## Examples
//!
//! ```rust
//! use shon::{ShonMap, Value};
//!
//! let mut map = ShonMap::new();
//! map.insert("b".to_string(), Value::from(1));
//! map.insert("a".to_string(), Value::from(2));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! ```

use indexmap::IndexMap;

/// An ordered map of string keys to SHON values, with per-entry comment
/// anchors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShonMap {
    entries: IndexMap<String, crate::Value>,
    comments: IndexMap<String, Vec<String>>,
}

impl ShonMap {
    #[must_use]
    pub fn new() -> Self {
        ShonMap {
            entries: IndexMap::new(),
            comments: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ShonMap {
            entries: IndexMap::with_capacity(capacity),
            comments: IndexMap::new(),
        }
    }

    /// Inserts a key-value pair. If the key was already present the old value
    /// is returned; the parser treats that case as a duplicate-key error
    /// before ever calling this.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.entries.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach comments anchored in front of the entry named `key`.
    pub fn set_comments(&mut self, key: &str, comments: Vec<String>) {
        if !comments.is_empty() {
            self.comments.insert(key.to_string(), comments);
        }
    }

    /// Comments anchored in front of the entry named `key`, if any.
    #[must_use]
    pub fn comments_of(&self, key: &str) -> &[String] {
        self.comments.get(key).map_or(&[], Vec::as_slice)
    }

    /// True if any entry in this map carries an anchored comment.
    #[must_use]
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.entries.values()
    }

    /// Key-value pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.entries.iter()
    }

    /// Key-value pairs in alphabetical key order; the map itself is left
    /// untouched.
    pub fn sorted_iter(&self) -> impl Iterator<Item = (&String, &crate::Value)> {
        let mut pairs: Vec<_> = self.entries.iter().collect();
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
        pairs.into_iter()
    }
}

impl IntoIterator for ShonMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShonMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, crate::Value)> for ShonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        ShonMap {
            entries: IndexMap::from_iter(iter),
            comments: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_insertion_order() {
        let mut map = ShonMap::new();
        map.insert("b".to_string(), Value::from(1));
        map.insert("a".to_string(), Value::from(2));
        map.insert("c".to_string(), Value::from(3));

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        let sorted: Vec<_> = map.sorted_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(sorted, vec!["a", "b", "c"]);
        // sorted_iter is a view; the map keeps its order
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_comment_anchors() {
        let mut map = ShonMap::new();
        map.insert("port".to_string(), Value::from(8080));
        map.set_comments("port", vec!["// listen port".to_string()]);

        assert_eq!(map.comments_of("port"), ["// listen port"]);
        assert!(map.comments_of("missing").is_empty());
        assert!(map.has_comments());
    }

    #[test]
    fn test_empty_comment_vec_is_not_stored() {
        let mut map = ShonMap::new();
        map.insert("k".to_string(), Value::Null);
        map.set_comments("k", vec![]);
        assert!(!map.has_comments());
    }
}
