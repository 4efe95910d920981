//! Lexical environment chains (§3 "Environment", §5 "Shared resources").
//!
//! A frame is `Rc<RefCell<EnvironmentData>>` rather than an arena-indexed
//! rib: a function value must capture its defining frame *by reference*,
//! so that a `let` executed
//! later in that frame is visible to closures created earlier from it
//! (§5). Reference cycles through captured environments are expected and
//! tolerated (§9) — there is no cycle collector, only process exit.

use std::cell::RefCell;
use std::rc::Rc;

use rill_util::Symbol;
use rustc_hash::FxHashMap;

use crate::value::Value;

#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

pub struct EnvironmentData {
    bindings: FxHashMap<Symbol, Value>,
    outer: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentData {
            bindings: FxHashMap::default(),
            outer: None,
        })))
    }

    pub fn child(outer: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentData {
            bindings: FxHashMap::default(),
            outer: Some(outer.clone()),
        })))
    }

    /// Walks outward on miss; `None` means "not bound anywhere in the
    /// chain" (the caller falls through to the built-ins table, §4.3).
    pub fn get(&self, name: Symbol) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(value) = data.bindings.get(&name) {
            return Some(value.clone());
        }
        data.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Always writes to *this* frame, never an outer one (§4.3
    /// Assignment — "no walk-up for assignment" is the pinned behavior,
    /// not a bug to fix).
    pub fn set(&self, name: Symbol, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_through_to_outer_frame() {
        let outer = Environment::new();
        outer.set(Symbol::intern("x"), Value::Integer(1));
        let inner = Environment::child(&outer);
        assert!(matches!(inner.get(Symbol::intern("x")), Some(Value::Integer(1))));
    }

    #[test]
    fn set_never_walks_up() {
        let outer = Environment::new();
        outer.set(Symbol::intern("x"), Value::Integer(1));
        let inner = Environment::child(&outer);
        inner.set(Symbol::intern("x"), Value::Integer(2));
        assert!(matches!(inner.get(Symbol::intern("x")), Some(Value::Integer(2))));
        assert!(matches!(outer.get(Symbol::intern("x")), Some(Value::Integer(1))));
    }

    #[test]
    fn closures_see_later_bindings_in_the_captured_frame() {
        let frame = Environment::new();
        // simulates a closure created before `y` existed in its captured frame
        let snapshot = frame.clone();
        frame.set(Symbol::intern("y"), Value::Integer(42));
        assert!(matches!(snapshot.get(Symbol::intern("y")), Some(Value::Integer(42))));
    }

    #[test]
    fn missing_identifier_returns_none() {
        let env = Environment::new();
        assert!(env.get(Symbol::intern("missing")).is_none());
    }
}
