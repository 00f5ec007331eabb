//! Object values: an insertion-ordered mapping from non-empty string keys
//! to `Value` (§3). The reference implementation keeps a flat pair list
//! with linear lookup; this port uses `indexmap::IndexMap`, which
//! preserves the same insertion-order-iteration guarantee while making
//! lookup/assignment average O(1) instead of O(n) — a strict improvement
//! the spec permits ("lookup is linear... for the reference
//! implementation", not a requirement implementers must match).

use indexmap::IndexMap;

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct ZenObject {
    entries: IndexMap<String, Value>,
}

impl ZenObject {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Inserts or updates `key`, preserving the key's original insertion
    /// position on update (matching `IndexMap`'s default `insert`
    /// semantics, which is what "insertion order" means for a mapping
    /// that also supports overwrite).
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }
}

impl<'a> IntoIterator for &'a ZenObject {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for ZenObject {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
