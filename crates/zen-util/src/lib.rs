//! Foundation types shared by every `zen-*` crate: source locations
//! ([`Span`], [`span::SourceMap`]), interned identifiers ([`Symbol`]), and
//! diagnostic reporting ([`diagnostic::Handler`]). No language semantics
//! live here — this crate never imports `zen-lexer`, `zen-parser`, or
//! `zen-value`.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use span::{FileId, Span};
pub use symbol::Symbol;
