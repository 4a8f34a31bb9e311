#![cfg_attr(docsrs, feature(doc_cfg))]

//! # logos-data
//!
//! Persistent data structures for the LOGOS execution engine, built directly
//! on [`logos_term`]'s vocabulary:
//!
//! - [`Bindings`] — the immutable cons-chain of variable/value associations
//! - [`StateMap`]/[`StateDefaults`] — the persistent map used for mutable
//!   globals, dynamic parameters, and sequence-step position counters
//! - [`OutputBuffer`] — the append-only, length-partitioned token array
//! - [`resolve`]/[`resolve_recursive`] — term dereferencing against a
//!   [`Bindings`] chain
//!
//! This crate has no knowledge of unification or step execution; those live
//! in `logos_kernel` and `logos_interp` respectively.

mod bindings;
mod buffer;
mod resolve;
mod state;

pub use bindings::Bindings;
pub use buffer::OutputBuffer;
pub use resolve::{resolve, resolve_recursive};
pub use state::{StateDefaults, StateMap};
