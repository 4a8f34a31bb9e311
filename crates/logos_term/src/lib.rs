#![cfg_attr(docsrs, feature(doc_cfg))]

//! # logos-term
//!
//! Pure structural term representation for LOGOS.
//!
//! This crate provides the foundational vocabulary of the execution engine:
//!
//! - [`Term`]/[`Atom`] — the tagged union of ground values, logic variables,
//!   tuples, and persistent-collection handles a step chain operates on
//! - [`LogicVar`]/[`VarFactory`] — identity-only placeholders and the
//!   allocator that mints them
//! - [`is_valid_state_name`] — the uppercase-leading-letter predicate that
//!   gates state/global variable names (shared with the external parser)
//!
//! # Design Principles
//!
//! This crate has **no knowledge of unification, backtracking, or I/O**. It
//! provides only the structural vocabulary that [`logos_kernel`] and
//! [`logos_interp`] build on — analogous to how `logicaffeine-base` carries
//! no knowledge of vocabulary or proof search.
//!
//! [`logos_kernel`]: https://docs.rs/logos-kernel
//! [`logos_interp`]: https://docs.rs/logos-interp

mod term;
mod var;

pub use term::{Atom, Collection, CollectionError, HeapEntry, Term};
pub use var::{LogicVar, VarFactory};

/// A token is a valid global/state name iff it begins with an uppercase
/// ASCII letter.
///
/// Shared between the (external) parser and this engine's construction-time
/// validation of `add`/`removeNext`/`set` state-variable arguments, so both
/// sides agree on exactly one predicate.
///
/// ```
/// use logos_term::is_valid_state_name;
///
/// assert!(is_valid_state_name("Count"));
/// assert!(!is_valid_state_name("count"));
/// assert!(!is_valid_state_name(""));
/// ```
pub fn is_valid_state_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_invalid() {
        assert!(!is_valid_state_name(""));
    }

    #[test]
    fn leading_digit_is_invalid() {
        assert!(!is_valid_state_name("1Foo"));
    }
}
