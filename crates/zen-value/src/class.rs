//! Class and Instance values (§3, §4.6). A class owns its methods object
//! and an optional strong reference to its parent; an instance holds a
//! strong reference to its class plus its own property object.

use std::rc::Rc;

use indexmap::IndexMap;
use zen_util::Symbol;

use crate::function::FunctionValue;
use crate::object::ZenObject;

pub struct ClassValue {
    pub name: Symbol,
    pub parent: Option<Rc<ClassValue>>,
    pub methods: IndexMap<Symbol, Rc<FunctionValue>>,
}

impl std::fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassValue")
            .field("name", &self.name.as_str())
            .field("parent", &self.parent.as_ref().map(|p| p.name.as_str()))
            .field("methods", &self.methods.len())
            .finish()
    }
}

impl ClassValue {
    pub fn new(name: Symbol, parent: Option<Rc<ClassValue>>) -> Self {
        Self {
            name,
            parent,
            methods: IndexMap::new(),
        }
    }

    /// Looks up a method on this class, then its parent chain (§4.6:
    /// "Method calls... look up on the instance's class and its parent
    /// chain").
    pub fn find_method(&self, name: Symbol) -> Option<Rc<FunctionValue>> {
        if let Some(m) = self.methods.get(&name) {
            return Some(m.clone());
        }
        self.parent.as_ref().and_then(|p| p.find_method(name))
    }

    /// The class's `init` method, if any — §3 calls this out as a
    /// distinct "optional constructor function" slot, but this port
    /// derives it from the methods object rather than storing it twice,
    /// since `new Foo` and `instance.init ...` are the same lookup.
    pub fn constructor(&self) -> Option<Rc<FunctionValue>> {
        self.find_method(Symbol::intern("init"))
    }

    pub fn is_subclass_of_or_eq(&self, other: &ClassValue) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match &self.parent {
            Some(p) => p.is_subclass_of_or_eq(other),
            None => false,
        }
    }
}

#[derive(Clone)]
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    pub properties: ZenObject,
}

impl std::fmt::Debug for InstanceValue {
    // Shallow for the same reason as `FunctionValue`'s impl: a property
    // can point back at this instance (`set obj.self obj`, §9's
    // documented cycle hazard).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceValue")
            .field("class", &self.class.name.as_str())
            .field("properties", &self.properties.len())
            .finish()
    }
}

impl InstanceValue {
    pub fn new(class: Rc<ClassValue>) -> Self {
        Self {
            class,
            properties: ZenObject::new(),
        }
    }
}
