//! Scope (§4.2): chained name-to-value bindings with parent pointers. A
//! function closure captures the scope active at its definition site, so
//! `Scope` lives in `zen-value` alongside `Value`/`FunctionValue` rather
//! than in `zen-eval` — otherwise the two crates would need each other
//! (see `DESIGN.md`).

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use zen_util::Symbol;

use crate::value::Value;

pub type ScopeRef = Rc<Scope>;

pub struct Scope {
    bindings: RefCell<FxHashMap<Symbol, Value>>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new(parent: Option<ScopeRef>) -> ScopeRef {
        Rc::new(Self {
            bindings: RefCell::new(FxHashMap::default()),
            parent,
        })
    }

    pub fn root() -> ScopeRef {
        Self::new(None)
    }

    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Self::new(Some(parent.clone()))
    }

    /// `define` always creates/overwrites in the current scope (§4.2).
    pub fn define(&self, name: Symbol, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Walks the parent chain and updates the nearest existing binding.
    /// Returns `false` (no mutation) if `name` is unbound anywhere on the
    /// chain, so the caller can raise `UndefinedVariable` (§4.2, §7).
    pub fn assign(&self, name: Symbol, value: Value) -> bool {
        if self.bindings.borrow().contains_key(&name) {
            self.bindings.borrow_mut().insert(name, value);
            return true;
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }

    /// Walks the parent chain, returning a cloned (ref-incremented)
    /// binding, or `None` if unbound anywhere.
    pub fn lookup(&self, name: Symbol) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(&name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    pub fn is_defined_locally(&self, name: Symbol) -> bool {
        self.bindings.borrow().contains_key(&name)
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_lookup_in_same_scope() {
        let scope = Scope::root();
        scope.define(Symbol::intern("x"), Value::Number(42.0));
        assert_eq!(scope.lookup(Symbol::intern("x")), Some(Value::Number(42.0)));
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let parent = Scope::root();
        parent.define(Symbol::intern("x"), Value::Number(1.0));
        let child = Scope::child(&parent);
        assert_eq!(child.lookup(Symbol::intern("x")), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_updates_nearest_binding_not_current_scope() {
        let parent = Scope::root();
        parent.define(Symbol::intern("x"), Value::Number(1.0));
        let child = Scope::child(&parent);
        assert!(child.assign(Symbol::intern("x"), Value::Number(2.0)));
        assert!(!child.is_defined_locally(Symbol::intern("x")));
        assert_eq!(parent.lookup(Symbol::intern("x")), Some(Value::Number(2.0)));
    }

    #[test]
    fn assign_to_undefined_name_fails() {
        let scope = Scope::root();
        assert!(!scope.assign(Symbol::intern("missing"), Value::Null));
    }

    #[test]
    fn define_shadows_in_child_scope() {
        let parent = Scope::root();
        parent.define(Symbol::intern("x"), Value::Number(1.0));
        let child = Scope::child(&parent);
        child.define(Symbol::intern("x"), Value::Number(2.0));
        assert_eq!(child.lookup(Symbol::intern("x")), Some(Value::Number(2.0)));
        assert_eq!(parent.lookup(Symbol::intern("x")), Some(Value::Number(1.0)));
    }
}
