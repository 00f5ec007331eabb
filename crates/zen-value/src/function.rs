//! Function values: closures over AST parameters/body plus a captured
//! scope (§3), and the host-function variant that lets `zen-stdlib`
//! register native callables in the root scope (§6).

use zen_parser::ast::{Expr, Stmt};
use zen_util::Symbol;

use crate::scope::ScopeRef;

/// A function body is either a block of statements (named `function`
/// defs, §3 "FunctionDef") or a single expression (`Lambda`, §3).
#[derive(Debug, Clone)]
pub enum FunctionBody {
    Block(std::rc::Rc<Vec<Stmt>>),
    Expr(std::rc::Rc<Expr>),
}

#[derive(Clone)]
pub struct FunctionValue {
    pub name: Option<Symbol>,
    pub params: Vec<Symbol>,
    pub body: FunctionBody,
    pub captured_scope: ScopeRef,
}

impl std::fmt::Debug for FunctionValue {
    // Deliberately shallow: a captured scope can (transitively, through a
    // stored Value) reference this very function again, so recursing into
    // scope contents here would risk the same unbounded-cycle problem
    // `Value::to_string`'s depth cap exists to avoid (§4.1).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name.map(|s| s.as_str()))
            .field("params", &self.params.len())
            .finish()
    }
}

impl FunctionValue {
    pub fn new(
        name: Option<Symbol>,
        params: Vec<Symbol>,
        body: FunctionBody,
        captured_scope: ScopeRef,
    ) -> Self {
        Self {
            name,
            params,
            body,
            captured_scope,
        }
    }
}

/// A host (native) function registered into the root scope by
/// `zen-stdlib` (§6). Host functions receive already-evaluated arguments
/// and "never throw out of band" — failures are returned as an
/// `Value::Error`, exactly like a ZEN-level function would produce.
pub struct HostFunction {
    pub name: &'static str,
    func: Box<dyn Fn(&[crate::value::Value]) -> crate::value::Value>,
}

impl HostFunction {
    pub fn new(
        name: &'static str,
        func: impl Fn(&[crate::value::Value]) -> crate::value::Value + 'static,
    ) -> Self {
        Self {
            name,
            func: Box::new(func),
        }
    }

    pub fn call(&self, args: &[crate::value::Value]) -> crate::value::Value {
        (self.func)(args)
    }
}

impl std::fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostFunction").field("name", &self.name).finish()
    }
}
