//! Symbol module - string interning for ZEN identifiers.
//!
//! A [`Symbol`] is a compact 4-byte handle to an interned string, stored in a
//! global, thread-safe string table. The lexer interns every identifier and
//! keyword lexeme it collects, so the parser and evaluator can compare names
//! in O(1) instead of re-comparing `String` contents.

mod interner;

pub use interner::{InternerStats, STRING_TABLE};

use std::fmt;
use std::hash::{Hash, Hasher};

/// An interned string identifier.
///
/// # Examples
///
/// ```
/// use zen_util::Symbol;
///
/// let a = Symbol::intern("set");
/// let b = Symbol::intern("set");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "set");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    index: u32,
}

impl Symbol {
    /// Interns `string`, returning its (possibly newly created) symbol.
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// Returns the interned string this symbol refers to.
    ///
    /// # Panics
    ///
    /// Panics if the symbol was constructed with `from_raw` and never
    /// actually interned — this cannot happen via the public `intern` API.
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE
            .get(*self)
            .expect("symbol not present in string table")
    }

    /// Raw numeric index into the global string table. Useful for
    /// serialization and debugging; never meaningful across processes.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    #[inline]
    pub(crate) fn from_raw(index: u32) -> Self {
        Self { index }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_same_symbol() {
        assert_eq!(Symbol::intern("alpha"), Symbol::intern("alpha"));
    }

    #[test]
    fn different_strings_different_symbols() {
        assert_ne!(Symbol::intern("alpha"), Symbol::intern("beta"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let s = Symbol::intern("whatever_goes_here_123");
        assert_eq!(s.as_str(), "whatever_goes_here_123");
    }
}
