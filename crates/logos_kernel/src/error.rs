//! Error taxonomy: contract violations that unwind the native stack
//! directly and are never caught by backtracking.
//!
//! A step returning `false` is not an error — it is the ordinary
//! backtrack signal. These variants are reserved for cases the source
//! language treats as a programmer or host mistake: wrong-shaped
//! arguments, unbound values where ground ones were required, or a
//! `call` the host asserted must succeed.

use logos_term::Term;
use std::fmt;

pub type Result<T> = std::result::Result<T, KernelError>;

/// A typed failure surfaced to the host, distinct from an ordinary
/// (`false`) backtrack.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Wrong number of arguments to a primitive or a call form.
    ArgumentCount { expected: usize, found: usize },

    /// A term of the wrong shape for the operation (e.g. `add` to a
    /// non-collection, a non-2-tuple to a heap `add`).
    ArgumentType { expected: &'static str, found: Term },

    /// A value required to be ground was a variable, or contained one.
    ArgumentInstantiation { context: &'static str },

    /// A step form was malformed at construction time.
    Syntax(String),

    /// A task the host asserted must succeed returned no solution.
    CallFailed { task: String },

    /// A wrapper carrying the offending task, its arguments, and the
    /// output accumulated so far, for diagnostics.
    CallException {
        task: String,
        args: Vec<Term>,
        output_so_far: String,
        cause: Box<KernelError>,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::ArgumentCount { expected, found } => {
                write!(f, "expected {} argument(s), found {}", expected, found)
            }
            KernelError::ArgumentType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            KernelError::ArgumentInstantiation { context } => {
                write!(f, "value must be ground in {}", context)
            }
            KernelError::Syntax(msg) => write!(f, "syntax error: {}", msg),
            KernelError::CallFailed { task } => write!(f, "call to '{}' did not succeed", task),
            KernelError::CallException { task, args, output_so_far, cause } => {
                write!(
                    f,
                    "call to '{}' with args {:?} raised {} (output so far: {:?})",
                    task, args, cause, output_so_far
                )
            }
        }
    }
}

impl std::error::Error for KernelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_exception_display_includes_the_task_name() {
        let err = KernelError::CallException {
            task: "Greet".to_string(),
            args: vec![],
            output_so_far: "hel".to_string(),
            cause: Box::new(KernelError::CallFailed { task: "Greet".to_string() }),
        };
        assert!(err.to_string().contains("Greet"));
    }
}
