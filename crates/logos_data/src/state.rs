//! Persistent state map: the binding list's counterpart for mutable
//! globals, dynamic parameters (e.g. a "third-person-singular" flag), and a
//! sequence step's branch-position counter.

use logos_term::Term;
use std::collections::HashMap;
use std::rc::Rc;

struct Node {
    key: Rc<str>,
    value: Term,
    tail: StateMap,
}

/// An immutable, append-only chain of `(state-element name, value)`
/// entries, structurally identical to `Bindings` but keyed by name rather
/// than by logic-variable identity.
#[derive(Clone)]
pub struct StateMap(Option<Rc<Node>>);

impl StateMap {
    /// The module-entry environment: no overrides recorded yet.
    pub fn empty() -> StateMap {
        StateMap(None)
    }

    /// The value most recently bound for `key`, ignoring defaults. Callers
    /// that want default fallback should use [`StateMap::lookup`] instead.
    pub fn lookup_override(&self, key: &str) -> Option<&Term> {
        let mut cur = &self.0;
        while let Some(node) = cur {
            if &*node.key == key {
                return Some(&node.value);
            }
            cur = &node.tail.0;
        }
        None
    }

    /// Looks up `key`, falling back to `defaults` when no entry exists yet.
    pub fn lookup(&self, key: &str, defaults: &StateDefaults) -> Option<Term> {
        self.lookup_override(key)
            .cloned()
            .or_else(|| defaults.get(key).cloned())
    }

    /// `O(1)`. Returns a new map; `self` is untouched and remains valid for
    /// any branch still holding it.
    pub fn bind(&self, key: impl Into<Rc<str>>, value: Term) -> StateMap {
        StateMap(Some(Rc::new(Node {
            key: key.into(),
            value,
            tail: self.clone(),
        })))
    }
}

impl Default for StateMap {
    fn default() -> Self {
        StateMap::empty()
    }
}

/// A module's table of state-element default values, consulted by
/// [`StateMap::lookup`] when no override has been bound yet. Built once at
/// module-construction time and never mutated thereafter.
#[derive(Clone, Default)]
pub struct StateDefaults(HashMap<String, Term>);

impl StateDefaults {
    pub fn new() -> Self {
        StateDefaults(HashMap::new())
    }

    /// Registers `key`'s default value. Returns `self` for chained setup.
    pub fn with_default(mut self, key: impl Into<String>, value: Term) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Term> {
        self.0.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos_term::Atom;

    #[test]
    fn bind_then_lookup_finds_the_new_value() {
        let s = StateMap::empty().bind("N", Term::Atom(Atom::Int(1)));
        let defaults = StateDefaults::new();
        assert_eq!(s.lookup("N", &defaults), Some(Term::Atom(Atom::Int(1))));
    }

    #[test]
    fn lookup_falls_back_to_default_when_unbound() {
        let s = StateMap::empty();
        let defaults = StateDefaults::new().with_default("N", Term::Atom(Atom::Int(0)));
        assert_eq!(s.lookup("N", &defaults), Some(Term::Atom(Atom::Int(0))));
    }

    #[test]
    fn override_wins_over_default() {
        let s = StateMap::empty().bind("N", Term::Atom(Atom::Int(5)));
        let defaults = StateDefaults::new().with_default("N", Term::Atom(Atom::Int(0)));
        assert_eq!(s.lookup("N", &defaults), Some(Term::Atom(Atom::Int(5))));
    }

    #[test]
    fn prior_view_is_unaffected_by_later_bind() {
        let before = StateMap::empty().bind("N", Term::Atom(Atom::Int(0)));
        let after = before.bind("N", Term::Atom(Atom::Int(1)));
        let defaults = StateDefaults::new();
        assert_eq!(before.lookup("N", &defaults), Some(Term::Atom(Atom::Int(0))));
        assert_eq!(after.lookup("N", &defaults), Some(Term::Atom(Atom::Int(1))));
    }

    #[test]
    fn unbound_key_with_no_default_is_none() {
        let s = StateMap::empty();
        let defaults = StateDefaults::new();
        assert_eq!(s.lookup("Missing", &defaults), None);
    }
}
