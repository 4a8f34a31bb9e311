//! Term representation for the LOGOS execution engine.
//!
//! In LOGOS, every value passed between steps and tasks is a [`Term`]: a
//! ground atom, a logic variable, a tuple, or a persistent collection.
//! Tuples nest arbitrarily; collections hold terms, including further
//! collections.

use crate::var::LogicVar;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Ground literal values.
#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Str(s) => write!(f, "{}", s),
            Atom::Int(n) => write!(f, "{}", n),
            Atom::Float(x) => write!(f, "{}", x),
            Atom::Bool(b) => write!(f, "{}", b),
            Atom::Null => write!(f, "null"),
        }
    }
}

/// A value that may appear as a task argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// A ground atom.
    Atom(Atom),
    /// An identity-only logic variable.
    Var(LogicVar),
    /// An ordered finite sequence of terms.
    Tuple(Rc<Vec<Term>>),
    /// A persistent collection handle.
    Collection(Collection),
}

impl Term {
    /// A term is ground when no node of its tree is an unbound logic
    /// variable. This does not consult any binding list — a variable node
    /// is never ground regardless of context; use
    /// `logos_data::resolve_recursive` first if bound variables should
    /// count as ground.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Atom(_) => true,
            Term::Var(_) => false,
            Term::Tuple(items) => items.iter().all(Term::is_ground),
            Term::Collection(c) => c.is_ground(),
        }
    }

    /// Structural equality: recursive on tuples and collections, identity
    /// on variables, host-equality on atoms.
    pub fn structural_equal(a: &Term, b: &Term) -> bool {
        match (a, b) {
            (Term::Atom(x), Term::Atom(y)) => x == y,
            (Term::Var(x), Term::Var(y)) => x == y,
            (Term::Tuple(x), Term::Tuple(y)) => {
                x.len() == y.len()
                    && x.iter().zip(y.iter()).all(|(a, b)| Term::structural_equal(a, b))
            }
            (Term::Collection(x), Term::Collection(y)) => x.structural_equal(y),
            _ => false,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) => write!(f, "{}", a),
            Term::Var(v) => write!(f, "{:?}", v),
            Term::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Term::Collection(c) => write!(f, "{}", c),
        }
    }
}

/// A persistent collection handle: list, set, stack, queue, or priority
/// heap of `(value, priority)` pairs.
///
/// Each variant is backed by an `Rc`-shared, clone-on-write structure.
/// `add`/`remove_next` return a *new* `Collection`; the receiver is never
/// mutated in place, matching the binding list's persistence discipline.
#[derive(Clone, Debug, PartialEq)]
pub enum Collection {
    /// Cons-list; `add` prepends.
    List(Rc<Vec<Term>>),
    /// Order-insensitive, duplicate-free; `add` inserts.
    Set(Rc<Vec<Term>>),
    /// LIFO; `add` pushes.
    Stack(Rc<Vec<Term>>),
    /// FIFO; `add` enqueues at the back.
    Queue(Rc<Vec<Term>>),
    /// Max-priority first; ties broken by insertion order (oldest first).
    Heap(Rc<Vec<HeapEntry>>),
}

/// One `(value, priority)` entry of a [`Collection::Heap`], plus the
/// insertion sequence number used to break priority ties.
#[derive(Clone, Debug, PartialEq)]
pub struct HeapEntry {
    pub value: Term,
    pub priority: f64,
    pub seq: u64,
}

/// Errors raised when a collection operation is asked to do something its
/// kind does not support, or its element shape is wrong.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionError {
    /// `add`/`remove_next` invoked on a `Term` that is not a collection at all.
    NotACollection,
    /// `add` to a heap whose element was not a 2-tuple `(value, numeric)`.
    NotAPriorityPair,
    /// `remove_next` on a collection kind with no defined removal order
    /// (a `Set` has no ordering, so it has none to remove by).
    NoRemovalOrder,
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::NotACollection => write!(f, "value is not a collection"),
            CollectionError::NotAPriorityPair => {
                write!(f, "heap element must be a (value, numeric priority) pair")
            }
            CollectionError::NoRemovalOrder => {
                write!(f, "collection kind has no defined removal order")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

impl Collection {
    /// An empty list, the usual starting value for a fresh state variable.
    pub fn empty_list() -> Collection {
        Collection::List(Rc::new(Vec::new()))
    }

    pub fn empty_set() -> Collection {
        Collection::Set(Rc::new(Vec::new()))
    }

    pub fn empty_stack() -> Collection {
        Collection::Stack(Rc::new(Vec::new()))
    }

    pub fn empty_queue() -> Collection {
        Collection::Queue(Rc::new(Vec::new()))
    }

    pub fn empty_heap() -> Collection {
        Collection::Heap(Rc::new(Vec::new()))
    }

    fn is_ground(&self) -> bool {
        match self {
            Collection::List(v) | Collection::Set(v) | Collection::Stack(v) | Collection::Queue(v) => {
                v.iter().all(Term::is_ground)
            }
            Collection::Heap(v) => v.iter().all(|e| e.value.is_ground()),
        }
    }

    fn structural_equal(&self, other: &Collection) -> bool {
        match (self, other) {
            (Collection::List(a), Collection::List(b))
            | (Collection::Set(a), Collection::Set(b))
            | (Collection::Stack(a), Collection::Stack(b))
            | (Collection::Queue(a), Collection::Queue(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| Term::structural_equal(x, y))
            }
            (Collection::Heap(a), Collection::Heap(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| {
                        x.priority == y.priority && Term::structural_equal(&x.value, &y.value)
                    })
            }
            _ => false,
        }
    }

    /// Append `elt` to whichever collection `self` is.
    ///
    /// `next_seq` supplies this insertion's sequence number for heap
    /// tie-breaking; callers thread a monotonically increasing counter
    /// (see `logos_interp::steps::Add`).
    pub fn add(&self, elt: Term, next_seq: u64) -> Result<Collection, CollectionError> {
        match self {
            Collection::List(v) => {
                let mut new = Vec::with_capacity(v.len() + 1);
                new.push(elt);
                new.extend(v.iter().cloned());
                Ok(Collection::List(Rc::new(new)))
            }
            Collection::Set(v) => {
                if v.iter().any(|e| Term::structural_equal(e, &elt)) {
                    Ok(Collection::Set(v.clone()))
                } else {
                    let mut new = (**v).clone();
                    new.push(elt);
                    Ok(Collection::Set(Rc::new(new)))
                }
            }
            Collection::Stack(v) => {
                let mut new = (**v).clone();
                new.push(elt);
                Ok(Collection::Stack(Rc::new(new)))
            }
            Collection::Queue(v) => {
                let mut new = (**v).clone();
                new.push(elt);
                Ok(Collection::Queue(Rc::new(new)))
            }
            Collection::Heap(v) => {
                let (value, priority) = extract_priority_pair(&elt)?;
                let mut new = (**v).clone();
                new.push(HeapEntry { value, priority, seq: next_seq });
                Ok(Collection::Heap(Rc::new(new)))
            }
        }
    }

    /// Remove and return the element defined by this collection's order:
    /// head of a list, top of a stack, front of a queue, max-priority of a
    /// heap. Returns `Ok(None)` on an empty collection (an ordinary
    /// backtrack failure, not an error).
    pub fn remove_next(&self) -> Result<Option<(Term, Collection)>, CollectionError> {
        match self {
            Collection::List(v) => {
                if v.is_empty() {
                    return Ok(None);
                }
                let head = v[0].clone();
                let rest = Collection::List(Rc::new(v[1..].to_vec()));
                Ok(Some((head, rest)))
            }
            Collection::Stack(v) => {
                if v.is_empty() {
                    return Ok(None);
                }
                let top = v[v.len() - 1].clone();
                let rest = Collection::Stack(Rc::new(v[..v.len() - 1].to_vec()));
                Ok(Some((top, rest)))
            }
            Collection::Queue(v) => {
                if v.is_empty() {
                    return Ok(None);
                }
                let front = v[0].clone();
                let rest = Collection::Queue(Rc::new(v[1..].to_vec()));
                Ok(Some((front, rest)))
            }
            Collection::Heap(v) => {
                if v.is_empty() {
                    return Ok(None);
                }
                let best_idx = v
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| {
                        a.priority
                            .partial_cmp(&b.priority)
                            .unwrap_or(Ordering::Equal)
                            .then(b.seq.cmp(&a.seq))
                    })
                    .map(|(i, _)| i)
                    .expect("non-empty heap has a max element");
                let entry = v[best_idx].clone();
                let mut rest = (**v).clone();
                rest.remove(best_idx);
                Ok(Some((entry.value, Collection::Heap(Rc::new(rest)))))
            }
            Collection::Set(_) => Err(CollectionError::NoRemovalOrder),
        }
    }
}

fn extract_priority_pair(elt: &Term) -> Result<(Term, f64), CollectionError> {
    match elt {
        Term::Tuple(items) if items.len() == 2 => match &items[1] {
            Term::Atom(Atom::Int(n)) => Ok((items[0].clone(), *n as f64)),
            Term::Atom(Atom::Float(x)) => Ok((items[0].clone(), *x)),
            _ => Err(CollectionError::NotAPriorityPair),
        },
        _ => Err(CollectionError::NotAPriorityPair),
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |f: &mut fmt::Formatter<'_>, items: &[Term]| -> fmt::Result {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, "]")
        };
        match self {
            Collection::List(v) => render(f, v),
            Collection::Set(v) => render(f, v),
            Collection::Stack(v) => render(f, v),
            Collection::Queue(v) => render(f, v),
            Collection::Heap(v) => {
                write!(f, "[")?;
                for (i, entry) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "({}, {})", entry.value, entry.priority)?;
                }
                write!(f, "]")
            }
        }
    }
}
