//! Logic variables: identity-only placeholders bound via unification.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// An identity token plus a debug name.
///
/// Variables are never mutated; they acquire values only by appearing as
/// the key of an entry in a binding list. Equality and hashing are by
/// identity alone — two variables with the same debug name are still
/// distinct unless they share an id.
#[derive(Clone)]
pub struct LogicVar {
    id: u64,
    name: Rc<str>,
}

impl LogicVar {
    /// The name this variable was declared under, for diagnostics and
    /// stack-trace rendering. Never used for equality.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identity this variable compares and hashes by.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for LogicVar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LogicVar {}

impl std::hash::Hash for LogicVar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for LogicVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}#{}", self.name, self.id)
    }
}

/// Allocator for fresh [`LogicVar`]s.
///
/// One local slot per method-frame entry calls [`VarFactory::fresh`] once;
/// the factory just mints identities, it holds no binding state itself —
/// bindings live in the binding list (`logos_data::Bindings`), not here.
#[derive(Default)]
pub struct VarFactory {
    next: AtomicU64,
}

impl VarFactory {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(0) }
    }

    /// Mint a fresh, globally-unique logic variable with the given debug name.
    pub fn fresh(&self, name: impl Into<Rc<str>>) -> LogicVar {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        LogicVar { id, name: name.into() }
    }
}
