//! Term resolution against a [`Bindings`] chain.
//!
//! These live here rather than in `logos_term` because they need the
//! `Bindings` type; `logos_term`'s own `is_ground`/`structural_equal` need
//! no binding context and stay there.

use crate::Bindings;
use logos_term::{Collection, HeapEntry, Term};
use std::rc::Rc;

/// Deref a term to its leading non-variable or unbound variable, chasing
/// variable-to-variable aliasing chains. Does not recurse into tuple or
/// collection leaves.
///
/// Idempotent: `resolve(resolve(t, b), b) == resolve(t, b)`.
pub fn resolve(t: &Term, bindings: &Bindings) -> Term {
    let mut current = t.clone();
    loop {
        match &current {
            Term::Var(v) => match bindings.lookup(v) {
                Some(next) => current = next.clone(),
                None => return current,
            },
            _ => return current,
        }
    }
}

/// Full recursive walk: resolves the top term, then — if it is a tuple or
/// collection — resolves every leaf as well. Used when emitting a term as
/// text or copying it into a call's argument list.
pub fn resolve_recursive(t: &Term, bindings: &Bindings) -> Term {
    let top = resolve(t, bindings);
    match top {
        Term::Tuple(items) => {
            let resolved: Vec<Term> = items.iter().map(|item| resolve_recursive(item, bindings)).collect();
            Term::Tuple(Rc::new(resolved))
        }
        Term::Collection(c) => Term::Collection(resolve_collection(&c, bindings)),
        other => other,
    }
}

fn resolve_collection(c: &Collection, bindings: &Bindings) -> Collection {
    match c {
        Collection::List(v) => Collection::List(Rc::new(map_terms(v, bindings))),
        Collection::Set(v) => Collection::Set(Rc::new(map_terms(v, bindings))),
        Collection::Stack(v) => Collection::Stack(Rc::new(map_terms(v, bindings))),
        Collection::Queue(v) => Collection::Queue(Rc::new(map_terms(v, bindings))),
        Collection::Heap(v) => {
            let resolved: Vec<HeapEntry> = v
                .iter()
                .map(|e| HeapEntry {
                    value: resolve_recursive(&e.value, bindings),
                    priority: e.priority,
                    seq: e.seq,
                })
                .collect();
            Collection::Heap(Rc::new(resolved))
        }
    }
}

fn map_terms(items: &[Term], bindings: &Bindings) -> Vec<Term> {
    items.iter().map(|item| resolve_recursive(item, bindings)).collect()
}
