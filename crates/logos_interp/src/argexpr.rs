//! Argument expressions: the vocabulary a call's argument list or a
//! method's argument pattern is built from — ground atoms, local-variable
//! references, state-variable references, tuple literals, and functional
//! expressions.

use logos_kernel::{Atom, Environment, Term};
use std::rc::Rc;

use crate::expr::{Expr, VarRef};
use crate::module::Module;

#[derive(Clone, Debug)]
pub enum ArgExpr {
    Atom(Atom),
    Var(VarRef),
    Tuple(Vec<ArgExpr>),
    Functional(Expr),
}

impl ArgExpr {
    /// Builds the `Term` this expression denotes against `env`. A
    /// `VarRef::Local` evaluates to the slot's logic variable itself
    /// (unresolved) so that unification, not evaluation, decides its
    /// value; every other leaf evaluates to a ground value.
    pub fn eval(&self, env: &Environment<Module>) -> Term {
        match self {
            ArgExpr::Atom(a) => Term::Atom(a.clone()),
            ArgExpr::Var(v) => v.eval(env),
            ArgExpr::Tuple(items) => {
                Term::Tuple(Rc::new(items.iter().map(|item| item.eval(env)).collect()))
            }
            ArgExpr::Functional(expr) => match expr.eval(env) {
                Ok(a) => Term::Atom(a),
                Err(_) => Term::Atom(Atom::Null),
            },
        }
    }
}
