//! Output buffer: an append-only token sequence with read/write duality.
//!
//! Every `OutputBuffer` value is a *view* — a shared handle to an
//! underlying array plus a length. Appending produces a new view sharing
//! the same underlying storage; the storage past any view's length may be
//! overwritten by a sibling branch's append, but positions `[0, length)` of
//! a view already handed to a caller are never touched while a descendant
//! of that view could still commit. This is the one place in the engine
//! where persistence is approximated rather than literal: a clone-per-token
//! design would be correct but needlessly costly, so storage is shared and
//! mutated only ahead of every live view's length.

use logos_term::{Atom, Term};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

/// A view onto a shared token array, either being written to (an emitting
/// method) or read from (matching against supplied input tokens).
#[derive(Clone)]
pub struct OutputBuffer {
    storage: Rc<RefCell<Vec<Term>>>,
    length: usize,
    write_mode: bool,
}

impl OutputBuffer {
    /// A fresh, empty write-mode buffer — the usual starting point for a
    /// top-level call.
    pub fn new_write() -> OutputBuffer {
        OutputBuffer {
            storage: Rc::new(RefCell::new(Vec::new())),
            length: 0,
            write_mode: true,
        }
    }

    /// A read-mode buffer preloaded with `tokens` to match an `emit` step
    /// against, cursor at the start.
    pub fn new_read(tokens: Vec<Term>) -> OutputBuffer {
        OutputBuffer {
            storage: Rc::new(RefCell::new(tokens)),
            length: 0,
            write_mode: false,
        }
    }

    pub fn is_write_mode(&self) -> bool {
        self.write_mode
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Copies `tokens` into the shared array starting at this view's
    /// length and returns a new view with the length advanced. Valid in
    /// write mode only; cannot fail.
    pub fn append(&self, tokens: &[Term]) -> OutputBuffer {
        debug_assert!(self.write_mode, "append is a write-mode operation");
        {
            let mut storage = self.storage.borrow_mut();
            storage.truncate(self.length);
            storage.extend_from_slice(tokens);
        }
        OutputBuffer {
            storage: self.storage.clone(),
            length: self.length + tokens.len(),
            write_mode: self.write_mode,
        }
    }

    /// Read-mode cursor advance: returns the next token and a view with
    /// the cursor moved past it, or `None` if the input is exhausted.
    pub fn next_token(&self) -> Option<(Term, OutputBuffer)> {
        debug_assert!(!self.write_mode, "next_token is a read-mode operation");
        let storage = self.storage.borrow();
        let token = storage.get(self.length)?.clone();
        drop(storage);
        Some((
            token,
            OutputBuffer {
                storage: self.storage.clone(),
                length: self.length + 1,
                write_mode: self.write_mode,
            },
        ))
    }

    /// In write mode, appends `tokens` unconditionally (matches `append`).
    /// In read mode, consumes the next `tokens.len()` input tokens and
    /// succeeds only if every one structurally matches; on success returns
    /// the advanced view, on mismatch or exhaustion returns `None`.
    pub fn unify(&self, tokens: &[Term]) -> Option<OutputBuffer> {
        if self.write_mode {
            return Some(self.append(tokens));
        }
        let mut view = self.clone();
        for wanted in tokens {
            let (actual, next) = view.next_token()?;
            if !Term::structural_equal(&actual, wanted) {
                return None;
            }
            view = next;
        }
        Some(view)
    }

    /// Appends `suffix` to the text of the last emitted token in place and
    /// returns the original token, or `None` if there is no last token or
    /// it is not a string atom. This is conjugate-verb's one sanctioned
    /// mutation of an already-committed buffer position: safe because no
    /// committed reader observes the buffer between this call and a
    /// matching [`OutputBuffer::restore_last`] on failure.
    pub fn conjugate_last(&self, suffix: &str) -> Option<Term> {
        debug_assert!(self.write_mode, "conjugate_last is a write-mode operation");
        if self.length == 0 {
            return None;
        }
        let mut storage = self.storage.borrow_mut();
        let idx = self.length - 1;
        let original = storage[idx].clone();
        match &storage[idx] {
            Term::Atom(Atom::Str(s)) => {
                let mut conjugated = s.clone();
                conjugated.push_str(suffix);
                storage[idx] = Term::Atom(Atom::Str(conjugated));
                Some(original)
            }
            _ => None,
        }
    }

    /// Undoes a [`OutputBuffer::conjugate_last`] mutation after the
    /// continuation that followed it returned false.
    pub fn restore_last(&self, original: Term) {
        if self.length == 0 {
            return;
        }
        let mut storage = self.storage.borrow_mut();
        let idx = self.length - 1;
        storage[idx] = original;
    }

    /// Renders positions `[0, length)` as a single string, tokens separated
    /// by one ASCII space.
    pub fn as_string(&self) -> String {
        let storage = self.storage.borrow();
        let mut out = String::new();
        for (i, token) in storage[..self.length].iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}", token);
        }
        out
    }
}
