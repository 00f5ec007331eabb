//! The runtime `Value` component (§4.1): a tagged, reference-counted
//! dynamic value, its container types, classes/instances, and the Scope
//! chain (§4.2).
//!
//! # Reference counting
//!
//! §4.1 specifies atomic reference counts "to keep the Value ABI
//! forward-compatible with a parallelized evaluator" while noting today's
//! evaluator is single-threaded and implementers may use a non-atomic
//! count if they document the restriction. This crate takes that option:
//! every heap-backed variant is `Rc`-wrapped rather than `Arc`-wrapped.
//! `Rc::clone`/drop *are* the `ref`/`unref` operations §4.1 asks for — the
//! public [`Value::retain`]/[`Value::release`] functions exist only to
//! name that contract explicitly and to expose `strong_count` for the
//! §8 reference-counting law tests. See `DESIGN.md` for the full
//! rationale, including why [`Scope`] lives here rather than in
//! `zen-eval` (a `Function` value captures its defining scope, so the
//! two types are mutually recursive and must share a crate).

mod array;
mod class;
mod error_value;
mod function;
mod hash_key;
mod object;
mod pqueue;
mod scope;
mod set;
mod string;
mod value;

pub use array::ZenArray;
pub use class::{ClassValue, InstanceValue};
pub use error_value::ErrorValue;
pub use function::{FunctionBody, FunctionValue, HostFunction};
pub use object::ZenObject;
pub use pqueue::ZenPriorityQueue;
pub use scope::{Scope, ScopeRef};
pub use set::ZenSet;
pub use string::ZenString;
pub use value::{TypeName, Value};
