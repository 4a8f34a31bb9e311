//! Functional expressions: the arithmetic tree used by `set` and wherever
//! a numeric argument is needed.
//!
//! Precedence: `*`/`/` bind tighter than binary `+`/`-`; unary `-` binds
//! tightest of all. Everything is left-associative. `int op int` stays
//! `int`, except that `int / int` returns `int` only when the division is
//! exact, otherwise `float`; any `float` operand promotes the whole
//! expression to `float`. A non-numeric operand is an `ArgumentType`
//! error, not a backtrack failure.

use logos_kernel::{resolve, Atom, KernelError, Result, Term};

use crate::module::Module;
use logos_kernel::Environment;

/// A compile-time variable reference, resolved against the current call's
/// locals array, state map, or module defaults.
#[derive(Clone, Debug)]
pub enum VarRef {
    /// A local slot in the current method's frame.
    Local(usize),
    /// A mutable global, keyed into the state map (falls back to the
    /// module's default table when unbound).
    State(String),
    /// An immutable module-global default, read the same way a `State`
    /// reference is but never a valid `set` target.
    Global(String),
}

impl VarRef {
    pub fn eval(&self, env: &Environment<Module>) -> Term {
        match self {
            VarRef::Local(slot) => env
                .local(*slot)
                .map(|v| Term::Var(v.clone()))
                .unwrap_or(Term::Atom(Atom::Null)),
            VarRef::State(name) | VarRef::Global(name) => {
                env.state.lookup(name, env.module.defaults()).unwrap_or(Term::Atom(Atom::Null))
            }
        }
    }
}

/// An arithmetic expression tree.
#[derive(Clone, Debug)]
pub enum Expr {
    Const(Atom),
    Var(VarRef),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn eval(&self, env: &Environment<Module>) -> Result<Atom> {
        match self {
            Expr::Const(a) => Ok(a.clone()),
            Expr::Var(v) => as_numeric(&resolve(&v.eval(env), &env.bindings)),
            Expr::Neg(e) => numeric_neg(e.eval(env)?),
            Expr::Add(a, b) => numeric_binop(a.eval(env)?, b.eval(env)?, Op::Add),
            Expr::Sub(a, b) => numeric_binop(a.eval(env)?, b.eval(env)?, Op::Sub),
            Expr::Mul(a, b) => numeric_binop(a.eval(env)?, b.eval(env)?, Op::Mul),
            Expr::Div(a, b) => numeric_binop(a.eval(env)?, b.eval(env)?, Op::Div),
        }
    }
}

enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

fn as_numeric(t: &Term) -> Result<Atom> {
    match t {
        Term::Atom(a @ Atom::Int(_)) | Term::Atom(a @ Atom::Float(_)) => Ok(a.clone()),
        other => Err(KernelError::ArgumentType { expected: "a numeric atom", found: other.clone() }),
    }
}

fn numeric_neg(a: Atom) -> Result<Atom> {
    match a {
        Atom::Int(n) => Ok(Atom::Int(-n)),
        Atom::Float(x) => Ok(Atom::Float(-x)),
        other => Err(KernelError::ArgumentType { expected: "a numeric atom", found: Term::Atom(other) }),
    }
}

fn numeric_binop(a: Atom, b: Atom, op: Op) -> Result<Atom> {
    match (a, b) {
        (Atom::Int(x), Atom::Int(y)) => match op {
            Op::Add => Ok(Atom::Int(x + y)),
            Op::Sub => Ok(Atom::Int(x - y)),
            Op::Mul => Ok(Atom::Int(x * y)),
            Op::Div => {
                if y != 0 && x % y == 0 {
                    Ok(Atom::Int(x / y))
                } else {
                    Ok(Atom::Float(x as f64 / y as f64))
                }
            }
        },
        (x, y) => {
            let x = as_f64(&x)?;
            let y = as_f64(&y)?;
            match op {
                Op::Add => Ok(Atom::Float(x + y)),
                Op::Sub => Ok(Atom::Float(x - y)),
                Op::Mul => Ok(Atom::Float(x * y)),
                Op::Div => Ok(Atom::Float(x / y)),
            }
        }
    }
}

fn as_f64(a: &Atom) -> Result<f64> {
    match a {
        Atom::Int(n) => Ok(*n as f64),
        Atom::Float(x) => Ok(*x),
        other => Err(KernelError::ArgumentType { expected: "a numeric atom", found: Term::Atom(other.clone()) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos_data::{StateDefaults, StateMap};
    use logos_kernel::VarFactory;
    use std::rc::Rc;

    fn env_with_locals(n: usize) -> Environment<Module> {
        let factory = VarFactory::new();
        let locals = Rc::new((0..n).map(|i| factory.fresh(format!("_{}", i))).collect());
        Environment::new(Rc::new(Module::empty()), locals, StateMap::empty(), None)
    }

    #[test]
    fn int_addition_stays_int() {
        let env = env_with_locals(0);
        let expr = Expr::Add(Box::new(Expr::Const(Atom::Int(2))), Box::new(Expr::Const(Atom::Int(3))));
        assert_eq!(expr.eval(&env).unwrap(), Atom::Int(5));
    }

    #[test]
    fn exact_int_division_stays_int() {
        let env = env_with_locals(0);
        let expr = Expr::Div(Box::new(Expr::Const(Atom::Int(6))), Box::new(Expr::Const(Atom::Int(3))));
        assert_eq!(expr.eval(&env).unwrap(), Atom::Int(2));
    }

    #[test]
    fn inexact_int_division_promotes_to_float() {
        let env = env_with_locals(0);
        let expr = Expr::Div(Box::new(Expr::Const(Atom::Int(7))), Box::new(Expr::Const(Atom::Int(2))));
        assert_eq!(expr.eval(&env).unwrap(), Atom::Float(3.5));
    }

    #[test]
    fn any_float_operand_promotes_the_result() {
        let env = env_with_locals(0);
        let expr = Expr::Add(Box::new(Expr::Const(Atom::Int(1))), Box::new(Expr::Const(Atom::Float(0.5))));
        assert_eq!(expr.eval(&env).unwrap(), Atom::Float(1.5));
    }

    #[test]
    fn unary_negation_of_an_int_stays_int() {
        let env = env_with_locals(0);
        let expr = Expr::Neg(Box::new(Expr::Const(Atom::Int(4))));
        assert_eq!(expr.eval(&env).unwrap(), Atom::Int(-4));
    }

    #[test]
    fn non_numeric_state_lookup_raises_argument_type_error() {
        let env = env_with_locals(0);
        let expr = Expr::Var(VarRef::State("Name".to_string()));
        let defaults = StateDefaults::new().with_default("Name", Term::Atom(Atom::Str("x".to_string())));
        let env = Environment { state: StateMap::empty(), module: Rc::new(Module::with_defaults(defaults)), ..env };
        assert!(matches!(expr.eval(&env), Err(KernelError::ArgumentType { .. })));
    }
}
