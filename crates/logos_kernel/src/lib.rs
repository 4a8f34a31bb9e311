#![cfg_attr(docsrs, feature(doc_cfg))]

//! # logos-kernel
//!
//! Unification, binding environments, and the step/continuation chain
//! runner — the machinery that drives method execution once a task
//! dispatch has committed to a method, but with no knowledge of what a
//! task, method, or step variant actually is (that belongs to
//! [`logos_interp`], which supplies the concrete module type this crate
//! is generic over).
//!
//! [`logos_interp`]: https://docs.rs/logos-interp

mod environment;
mod error;
mod frame;
mod step;
mod unify;

pub use environment::Environment;
pub use error::{KernelError, Result};
pub use frame::Frame;
pub use step::{Chain, Continuation, Step};
pub use unify::unify;

pub use logos_data::{resolve, resolve_recursive, Bindings, OutputBuffer, StateDefaults, StateMap};
pub use logos_term::{Atom, Collection, CollectionError, HeapEntry, LogicVar, Term, VarFactory};
