//! # logos-interp
//!
//! The interpreter layer built on [`logos_kernel`]: functional expressions
//! (`Expr`), argument expressions (`ArgExpr`), the step variants a method
//! body is assembled from ([`steps`]), and the module host interface
//! (`Module`, `Task`, `Method`, `PrimitiveTask`, `dispatch`).
//!
//! [`logos_kernel`]: https://docs.rs/logos-kernel

pub mod argexpr;
pub mod expr;
pub mod module;
pub mod steps;

pub use argexpr::ArgExpr;
pub use expr::{Expr, VarRef};
pub use module::{dispatch, Method, Module, PrimitiveTask, Task, TaskEntry};
