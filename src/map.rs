//! Insertion-ordered map used by the dictionary projection and the decode
//! bridge.
//!
//! Keyed S-expression data is an association list, so ordering is
//! significant; [`SexpMap`] preserves it by wrapping [`IndexMap`].

use indexmap::IndexMap;

use crate::value::Sexp;

/// An insertion-ordered map from keys to S-expression values.
///
/// Inserting an existing key replaces its value but keeps the key's original
/// position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SexpMap {
    entries: IndexMap<String, Sexp>,
}

impl SexpMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SexpMap {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a key-value entry, returning the previous value if the key
    /// was present.
    pub fn insert(&mut self, key: impl Into<String>, value: Sexp) -> Option<Sexp> {
        self.entries.insert(key.into(), value)
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Sexp> {
        self.entries.get(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn shift_remove(&mut self, key: &str) -> Option<Sexp> {
        self.entries.shift_remove(key)
    }

    /// Whether the map contains a key.
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

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Sexp> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Sexp> {
        self.entries.keys()
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Sexp> {
        self.entries.values()
    }
}

impl IntoIterator for SexpMap {
    type Item = (String, Sexp);
    type IntoIter = indexmap::map::IntoIter<String, Sexp>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SexpMap {
    type Item = (&'a String, &'a Sexp);
    type IntoIter = indexmap::map::Iter<'a, String, Sexp>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Sexp)> for SexpMap {
    fn from_iter<I: IntoIterator<Item = (String, Sexp)>>(iter: I) -> Self {
        SexpMap {
            entries: iter.into_iter().collect(),
        }
    }
}
