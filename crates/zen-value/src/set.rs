//! Set values: distinct `Value`s keyed by a canonical hash string (§3).

use indexmap::IndexMap;

use crate::hash_key::canonical_key;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct ZenSet {
    entries: IndexMap<String, Value>,
}

impl ZenSet {
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

    /// Inserts `value`, returning `true` if it was newly added (i.e. no
    /// equal value was already present).
    pub fn insert(&mut self, value: Value) -> bool {
        let key = canonical_key(&value);
        let was_new = !self.entries.contains_key(&key);
        self.entries.insert(key, value);
        was_new
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries.contains_key(&canonical_key(value))
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        self.entries.shift_remove(&canonical_key(value)).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}
