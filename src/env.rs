use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::builtin;
use crate::value::Value;

/// Environments are shared: a closure keeps its defining frame alive for as
/// long as the closure itself is reachable.
pub type EnvRef<'a> = Rc<RefCell<Env<'a>>>;

/// One scope frame: a name-to-value mapping plus an optional link to the
/// enclosing frame, forming a singly-linked lookup chain.
#[derive(Debug)]
pub struct Env<'a> {
    store: BTreeMap<&'a str, Value<'a>>,
    outer: Option<EnvRef<'a>>,
}

impl<'a> Env<'a> {
    /// The global frame, pre-populated with every builtin under its table
    /// name so primitives are reachable as first-class values.
    pub fn basic() -> EnvRef<'a> {
        let mut store = BTreeMap::new();
        for (name, op) in builtin::TABLE {
            store.insert(name, Value::Builtin(op));
        }
        Rc::new(RefCell::new(Env { store, outer: None }))
    }

    /// A fresh innermost frame chained to `outer`.
    pub fn nested(outer: &EnvRef<'a>) -> EnvRef<'a> {
        Rc::new(RefCell::new(Env {
            store: BTreeMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Resolve a name, walking from this frame outward until the chain is
    /// exhausted.
    pub fn lookup(&self, name: &str) -> Option<Value<'a>> {
        self.store
            .get(name)
            .cloned()
            .or_else(|| self.outer.as_ref().and_then(|o| o.borrow().lookup(name)))
    }

    /// Bind a name in this frame. `define` always writes the innermost
    /// frame; enclosing frames are never touched.
    pub fn define(&mut self, name: &'a str, value: Value<'a>) {
        self.store.insert(name, value);
    }
}
