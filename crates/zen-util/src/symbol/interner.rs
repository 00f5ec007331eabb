//! Thread-safe string interner backing [`super::Symbol`].
//!
//! Uses `DashMap` for lock-free concurrent interning (kept even though
//! today's evaluator is single-threaded, for the same forward-compatibility
//! reason the value system's reference counts are atomic — see the runtime
//! model notes in `zen-value`).

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::LazyLock;

use super::Symbol;

/// ZEN keyword and common-identifier lexemes, pre-interned so they have
/// stable low indices and never require a write lock on the hot path.
const KNOWN_SYMBOLS: &[&str] = &[
    "set", "function", "if", "elif", "else", "while", "for", "in", "return", "break", "continue",
    "true", "false", "null", "class", "new", "and", "or", "not", "self", "init",
    "print", "readLine", "toNumber", "toString", "jsonParse", "jsonStringify", "length",
    "split", "join", "toUpperCase", "toLowerCase", "random", "round",
];

/// Boundary below which a symbol's index is guaranteed to be one of
/// [`KNOWN_SYMBOLS`], reserved so identifiers never collide with keywords.
const RESERVED_SYMBOLS_END: u32 = 256;

pub(crate) static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Snapshot of interner usage, useful for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternerStats {
    pub count: usize,
    pub hits: usize,
    pub misses: usize,
}

pub(crate) struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn initialize_known_symbols(&self) {
        for (idx, &lexeme) in KNOWN_SYMBOLS.iter().enumerate() {
            let idx = idx as u32;
            if idx >= RESERVED_SYMBOLS_END {
                break;
            }
            let hash = Self::hash_string(lexeme);
            self.map.insert(hash, (lexeme, idx));
        }
    }

    pub fn intern(&self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == string {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Symbol::from_raw(entry.value().1);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) if entry.get().0 == string => {
                Symbol::from_raw(entry.get().1)
            }
            _ => {
                let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                self.map.insert(hash, (interned, idx));
                Symbol::from_raw(idx)
            }
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.as_u32())
            .map(|entry| entry.value().0)
    }

    #[inline]
    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats {
            count: self.map.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Symbol;

    #[test]
    fn known_keyword_is_stable() {
        let a = Symbol::intern("function");
        let b = Symbol::intern("function");
        assert_eq!(a.as_u32(), b.as_u32());
        assert!(a.as_u32() < 256);
    }
}
