//! Persistent binding list: the immutable chain of variable/value
//! associations a step chain extends as it unifies terms.

use logos_term::{LogicVar, Term};
use std::rc::Rc;

struct Node {
    var: LogicVar,
    value: Term,
    tail: Bindings,
}

/// An immutable, append-only chain of `(variable, value)` associations.
///
/// Cloning a `Bindings` is O(1) — it is a reference-counted pointer to the
/// chain's head. Extension prepends a new node and shares the old tail, so
/// multiple branches may hold overlapping prefixes safely. No entry is ever
/// mutated in place; backtracking simply drops a `Bindings` value and
/// resumes from an older one.
#[derive(Clone)]
pub struct Bindings(Option<Rc<Node>>);

impl Bindings {
    /// The root environment: no bindings.
    pub fn empty() -> Bindings {
        Bindings(None)
    }

    /// `O(chain length)`. A variable may have multiple entries across the
    /// chain; the head-most (most recently extended) one wins.
    pub fn lookup(&self, v: &LogicVar) -> Option<&Term> {
        let mut cur = &self.0;
        while let Some(node) = cur {
            if &node.var == v {
                return Some(&node.value);
            }
            cur = &node.tail.0;
        }
        None
    }

    /// `O(1)`. Returns a new chain; `self` is left untouched and remains
    /// valid for any branch still holding it.
    pub fn extend(&self, v: LogicVar, value: Term) -> Bindings {
        Bindings(Some(Rc::new(Node {
            var: v,
            value,
            tail: self.clone(),
        })))
    }

    /// Is `v` bound in this chain?
    pub fn is_bound(&self, v: &LogicVar) -> bool {
        self.lookup(v).is_some()
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Bindings::empty()
    }
}
