//! Structural unification over terms, producing an extended binding list
//! or failure. No occurs check — intentionally; see module docs on
//! `Unifier` usage for why.

use logos_data::{resolve, Bindings};
use logos_term::{Atom, Term};

/// Unify `x` and `y` under `bindings`, returning the extended chain on
/// success or `None` on failure. Never mutates; `bindings` itself is
/// always still valid after a failed call.
///
/// Algorithm:
/// 1. Deref both operands to their leading non-variable or unbound variable.
/// 2. If both are the same unbound variable, bindings are unchanged.
/// 3. If one is an unbound variable, extend bindings mapping it to the other.
/// 4. If both are tuples of equal length, unify element-wise, threading bindings.
/// 5. If both are ground atoms, succeed iff host-equal.
/// 6. Otherwise, fail — including two collection terms, which this language
///    never unifies directly (they are read and written through state, not
///    pattern-matched against each other).
///
/// No occurs check is performed: unifying a variable with a tuple that
/// contains it succeeds and produces a binding list with no termination
/// guarantee under `resolve_recursive`. Do not construct such terms.
pub fn unify(x: &Term, y: &Term, bindings: &Bindings) -> Option<Bindings> {
    let x = resolve(x, bindings);
    let y = resolve(y, bindings);

    match (&x, &y) {
        (Term::Var(a), Term::Var(b)) if a == b => Some(bindings.clone()),
        (Term::Var(a), _) => Some(bindings.extend(a.clone(), y)),
        (_, Term::Var(b)) => Some(bindings.extend(b.clone(), x)),
        (Term::Tuple(xs), Term::Tuple(ys)) => {
            if xs.len() != ys.len() {
                return None;
            }
            let mut current = bindings.clone();
            for (a, b) in xs.iter().zip(ys.iter()) {
                current = unify(a, b, &current)?;
            }
            Some(current)
        }
        (Term::Atom(a), Term::Atom(b)) => atoms_equal(a, b).then(|| bindings.clone()),
        _ => None,
    }
}

fn atoms_equal(a: &Atom, b: &Atom) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos_term::VarFactory;

    fn int(n: i64) -> Term {
        Term::Atom(Atom::Int(n))
    }

    #[test]
    fn unbound_variable_unifies_with_anything() {
        let factory = VarFactory::new();
        let x = factory.fresh("X");
        let b = Bindings::empty();
        let result = unify(&Term::Var(x.clone()), &int(5), &b).unwrap();
        assert_eq!(resolve(&Term::Var(x), &result), int(5));
    }

    #[test]
    fn ground_atoms_unify_iff_equal() {
        let b = Bindings::empty();
        assert!(unify(&int(1), &int(1), &b).is_some());
        assert!(unify(&int(1), &int(2), &b).is_none());
    }

    #[test]
    fn equal_length_tuples_unify_element_wise() {
        let factory = VarFactory::new();
        let x = factory.fresh("X");
        let b = Bindings::empty();
        let left = Term::Tuple(std::rc::Rc::new(vec![int(1), Term::Var(x.clone())]));
        let right = Term::Tuple(std::rc::Rc::new(vec![int(1), int(2)]));
        let result = unify(&left, &right, &b).unwrap();
        assert_eq!(resolve(&Term::Var(x), &result), int(2));
    }

    #[test]
    fn mismatched_tuple_lengths_fail() {
        let b = Bindings::empty();
        let left = Term::Tuple(std::rc::Rc::new(vec![int(1)]));
        let right = Term::Tuple(std::rc::Rc::new(vec![int(1), int(2)]));
        assert!(unify(&left, &right, &b).is_none());
    }

    #[test]
    fn unification_is_symmetric_on_shared_variable_resolution() {
        let factory = VarFactory::new();
        let x = factory.fresh("X");
        let b = Bindings::empty();
        let forward = unify(&Term::Var(x.clone()), &int(7), &b).unwrap();
        let backward = unify(&int(7), &Term::Var(x.clone()), &b).unwrap();
        assert_eq!(resolve(&Term::Var(x.clone()), &forward), resolve(&Term::Var(x), &backward));
    }

    #[test]
    fn two_unbound_variables_unify_by_aliasing_one_to_the_other() {
        let factory = VarFactory::new();
        let x = factory.fresh("X");
        let y = factory.fresh("Y");
        let b = Bindings::empty();
        let result = unify(&Term::Var(x.clone()), &Term::Var(y.clone()), &b).unwrap();
        let joint = result.extend(y.clone(), int(9));
        assert_eq!(resolve(&Term::Var(x), &joint), int(9));
    }

    #[test]
    fn same_unbound_variable_unifies_with_itself_leaving_bindings_unchanged() {
        let factory = VarFactory::new();
        let x = factory.fresh("X");
        let b = Bindings::empty();
        let result = unify(&Term::Var(x.clone()), &Term::Var(x.clone()), &b).unwrap();
        assert!(!result.is_bound(&x));
    }
}
