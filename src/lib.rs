//! `logos-engine`: a unification-and-backtracking execution engine for the
//! LOGOS task/method/step language.
//!
//! This crate is a thin facade over the four crates that do the actual
//! work — [`logos_term`], [`logos_data`], [`logos_kernel`], and
//! [`logos_interp`] — re-exporting the types an embedder needs to build a
//! [`Module`]'s task table and drive it with [`Module::call`].
//!
//! [`logos_term`]: https://docs.rs/logos-term
//! [`logos_data`]: https://docs.rs/logos-data
//! [`logos_kernel`]: https://docs.rs/logos-kernel
//! [`logos_interp`]: https://docs.rs/logos-interp

pub use logos_data::{resolve, resolve_recursive, Bindings, OutputBuffer, StateDefaults, StateMap};
pub use logos_interp::{dispatch, steps, ArgExpr, Expr, Method, Module, PrimitiveTask, Task, TaskEntry, VarRef};
pub use logos_kernel::{unify, Chain, Continuation, Environment, Frame, KernelError, Result, Step};
pub use logos_term::{is_valid_state_name, Atom, Collection, CollectionError, HeapEntry, LogicVar, Term, VarFactory};
