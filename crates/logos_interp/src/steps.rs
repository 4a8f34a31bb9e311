//! Step variants: `emit`, `call`, `set`, `add`, `removeNext`, `cool`,
//! `sequence`, and `conjugate-verb`.

use std::cell::Cell;
use std::rc::Rc;

use logos_kernel::{
    resolve_recursive, unify, Atom, Chain, CollectionError, Continuation, Environment, Frame, KernelError,
    OutputBuffer, Result, Step, Term,
};

use crate::argexpr::ArgExpr;
use crate::expr::Expr;
use crate::module::{dispatch, Module};

/// Holds a token sequence, each built from the current call's environment
/// (so a token may be a ground literal or a reference to one of the
/// method's own locals, e.g. `[emit ?n]`). In write mode, appends and
/// continues unconditionally. In read mode, structurally unifies the
/// resolved tokens against the next input and continues only if all of
/// them match.
pub struct Emit {
    pub tokens: Vec<ArgExpr>,
}

impl Step<Module> for Emit {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let resolved: Vec<Term> = self.tokens.iter().map(|t| resolve_recursive(&t.eval(&env), &env.bindings)).collect();
        match out.unify(&resolved) {
            Some(out2) => k(out2, env.bindings, env.state, predecessor),
            None => Ok(false),
        }
    }
}

/// Invokes another task — compound or primitive — with a resolved
/// argument list. The callee sees the caller's own logic variables; no
/// deep copy is made.
pub struct Call {
    pub task_name: String,
    pub args: Vec<ArgExpr>,
}

impl Step<Module> for Call {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let args: Vec<Term> = self.args.iter().map(|a| a.eval(&env)).collect();
        let module = env.module.clone();
        dispatch(&module, &self.task_name, args, &env, out, predecessor, k)
    }
}

/// `[set expr var]`: evaluates `expr` to a ground numeric value and
/// rebinds the target state variable to it.
pub struct Set {
    pub target: String,
    pub expr: Expr,
}

impl Step<Module> for Set {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let value = self.expr.eval(&env)?;
        let state = env.state.bind(self.target.clone(), Term::Atom(value));
        k(out, env.bindings, state, predecessor)
    }
}

/// `[add elt var]`: appends `elt` to whichever persistent collection `var`
/// currently holds. An `ArgumentType` error, not a backtrack failure, if
/// `var` does not hold a collection or (for a heap) `elt` is not a
/// `(value, numeric)` pair.
pub struct Add {
    pub target: String,
    pub element: ArgExpr,
}

impl Step<Module> for Add {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let current = env.state.lookup(&self.target, env.module.defaults());
        let collection = match current {
            Some(Term::Collection(c)) => c,
            other => {
                return Err(KernelError::ArgumentType {
                    expected: "a collection",
                    found: other.unwrap_or(Term::Atom(Atom::Null)),
                })
            }
        };
        let element = resolve_recursive(&self.element.eval(&env), &env.bindings);
        let seq = env.module.next_heap_seq();
        let updated = collection.add(element, seq).map_err(collection_error_to_kernel)?;
        let state = env.state.bind(self.target.clone(), Term::Collection(updated));
        k(out, env.bindings, state, predecessor)
    }
}

/// `[removeNext pattern var]`: takes the element defined by `var`'s
/// collection order and unifies it against `pattern`. Fails (ordinary
/// backtrack) on an empty collection or a unification mismatch; errors if
/// `var` is not a collection, or holds a set (which has no removal order).
pub struct RemoveNext {
    pub target: String,
    pub pattern: ArgExpr,
}

impl Step<Module> for RemoveNext {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let current = env.state.lookup(&self.target, env.module.defaults());
        let collection = match current {
            Some(Term::Collection(c)) => c,
            other => {
                return Err(KernelError::ArgumentType {
                    expected: "a collection",
                    found: other.unwrap_or(Term::Atom(Atom::Null)),
                })
            }
        };
        let removed = collection.remove_next().map_err(collection_error_to_kernel)?;
        let (element, rest) = match removed {
            Some(pair) => pair,
            None => return Ok(false),
        };
        let pattern_term = self.pattern.eval(&env);
        match unify(&element, &pattern_term, &env.bindings) {
            Some(bindings) => {
                let state = env.state.bind(self.target.clone(), Term::Collection(rest));
                k(out, bindings, state, predecessor)
            }
            None => Ok(false),
        }
    }
}

fn collection_error_to_kernel(e: CollectionError) -> KernelError {
    match e {
        CollectionError::NotACollection => KernelError::ArgumentType { expected: "a collection", found: Term::Atom(Atom::Null) },
        CollectionError::NotAPriorityPair => {
            KernelError::ArgumentType { expected: "a (value, numeric priority) pair", found: Term::Atom(Atom::Null) }
        }
        CollectionError::NoRemovalOrder => KernelError::ArgumentType { expected: "a collection with a defined removal order", found: Term::Atom(Atom::Null) },
    }
}

/// A per-step cooldown fuse. Not persistent — the one other intentional
/// piece of mutable per-step state alongside [`Sequence`]'s position
/// counter. `u64::MAX` is a saturated fuse that never decrements back to
/// zero on its own.
pub struct Cool {
    pub duration: u64,
    pub guarded: Rc<Chain<Module>>,
    fuse: Cell<u64>,
}

impl Cool {
    pub fn new(duration: u64, guarded: Rc<Chain<Module>>) -> Cool {
        Cool { duration, guarded, fuse: Cell::new(0) }
    }
}

impl Step<Module> for Cool {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let fuse = self.fuse.get();
        if fuse != 0 {
            if fuse != u64::MAX {
                self.fuse.set(fuse - 1);
            }
            return Ok(false);
        }
        self.fuse.set(self.duration);
        let committed = self.guarded.run(out, env, k, predecessor)?;
        if !committed {
            self.fuse.set(0);
        }
        Ok(committed)
    }
}

/// An ordered array of branch step-chains plus a position counter. Each
/// call runs the next branch in order; once exhausted, every further call
/// fails. The counter lives in a `Cell` rather than the persistent state
/// map precisely so that it survives a downstream failure after this
/// step's own commit — an intentional deviation from ordinary state-map
/// discard-on-backtrack semantics.
pub struct Sequence {
    pub branches: Vec<Rc<Chain<Module>>>,
    position: Cell<usize>,
}

impl Sequence {
    pub fn new(branches: Vec<Rc<Chain<Module>>>) -> Sequence {
        Sequence { branches, position: Cell::new(0) }
    }
}

impl Step<Module> for Sequence {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let position = self.position.get();
        if position >= self.branches.len() {
            return Ok(false);
        }
        self.position.set(position + 1);
        self.branches[position].run(out, env, k, predecessor)
    }
}

/// Reads a boolean state flag; if true, appends `"s"` to the last emitted
/// token before continuing, restoring it if the continuation fails.
pub struct ConjugateVerb {
    pub flag: String,
}

impl Step<Module> for ConjugateVerb {
    fn try_step(&self, out: OutputBuffer, env: Environment<Module>, k: &mut Continuation<'_>, predecessor: Option<Rc<Frame>>) -> Result<bool> {
        let active = matches!(
            env.state.lookup(&self.flag, env.module.defaults()),
            Some(Term::Atom(Atom::Bool(true)))
        );
        if !active {
            return k(out, env.bindings, env.state, predecessor);
        }
        let original = out.conjugate_last("s");
        let committed = k(out.clone(), env.bindings, env.state, predecessor)?;
        if !committed {
            if let Some(token) = original {
                out.restore_last(token);
            }
        }
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos_data::{StateDefaults, StateMap};
    use logos_term::Collection;

    fn run_chain(chain: &Rc<Chain<Module>>, module: Rc<Module>, state: StateMap) -> (bool, Option<String>) {
        let out = OutputBuffer::new_write();
        let env = Environment::new(module, Rc::new(Vec::new()), state, None);
        let mut final_out = None;
        let committed = chain
            .run(out, env, &mut |out2, _b, _s, _f| {
                final_out = Some(out2.as_string());
                Ok(true)
            }, None)
            .unwrap();
        (committed, final_out)
    }

    fn word(s: &str) -> ArgExpr {
        ArgExpr::Atom(Atom::Str(s.to_string()))
    }

    #[test]
    fn emit_in_write_mode_always_continues() {
        let chain = Rc::new(Chain::new(vec![Rc::new(Emit { tokens: vec![word("hello")] })]));
        let (committed, out) = run_chain(&chain, Rc::new(Module::empty()), StateMap::empty());
        assert!(committed);
        assert_eq!(out.unwrap(), "hello");
    }

    #[test]
    fn emit_of_a_bound_local_resolves_to_its_value() {
        use crate::expr::VarRef;
        use logos_kernel::VarFactory;

        let factory = VarFactory::new();
        let local = factory.fresh("N");
        let module = Rc::new(Module::empty());
        let locals = Rc::new(vec![local.clone()]);
        let env = Environment::new(module, locals, StateMap::empty(), None);
        let bindings = env.bindings.extend(local, Term::Atom(Atom::Int(7)));
        let env = env.with_bindings(bindings);

        let emit = Emit { tokens: vec![ArgExpr::Var(VarRef::Local(0))] };
        let out = OutputBuffer::new_write();
        let mut seen = None;
        emit.try_step(out, env, &mut |out2, _b, _s, _f| {
            seen = Some(out2.as_string());
            Ok(true)
        }, None)
        .unwrap();
        assert_eq!(seen.unwrap(), "7");
    }

    #[test]
    fn set_then_emit_reflects_the_new_state() {
        let defaults = StateDefaults::new().with_default("N", Term::Atom(Atom::Int(0)));
        let module = Rc::new(Module::with_defaults(defaults));
        let set = Set { target: "N".to_string(), expr: Expr::Const(Atom::Int(1)) };
        let chain: Rc<Chain<Module>> = Rc::new(Chain::new(vec![Rc::new(set)]));
        let out = OutputBuffer::new_write();
        let env = Environment::new(module.clone(), Rc::new(Vec::new()), StateMap::empty(), None);
        let mut seen_state = None;
        chain
            .run(out, env, &mut |_out2, _b, s, _f| {
                seen_state = Some(s.lookup("N", module.defaults()));
                Ok(true)
            }, None)
            .unwrap();
        assert_eq!(seen_state.unwrap(), Some(Term::Atom(Atom::Int(1))));
    }

    #[test]
    fn add_then_remove_next_on_a_list_round_trips() {
        let defaults = StateDefaults::new().with_default("L", Term::Collection(Collection::empty_list()));
        let module = Rc::new(Module::with_defaults(defaults));
        let add3 = Add { target: "L".to_string(), element: ArgExpr::Atom(Atom::Int(3)) };
        let add4 = Add { target: "L".to_string(), element: ArgExpr::Atom(Atom::Int(4)) };
        let remove = RemoveNext { target: "L".to_string(), pattern: ArgExpr::Atom(Atom::Int(4)) };
        let chain: Rc<Chain<Module>> = Rc::new(Chain::new(vec![
            Rc::new(add3) as Rc<dyn Step<Module>>,
            Rc::new(add4) as Rc<dyn Step<Module>>,
            Rc::new(remove) as Rc<dyn Step<Module>>,
        ]));
        let (committed, _) = run_chain(&chain, module, StateMap::empty());
        assert!(committed);
    }

    #[test]
    fn add_on_non_collection_is_an_error_not_a_failure() {
        let defaults = StateDefaults::new().with_default("X", Term::Atom(Atom::Int(1)));
        let module = Rc::new(Module::with_defaults(defaults));
        let add = Add { target: "X".to_string(), element: ArgExpr::Atom(Atom::Int(1)) };
        let out = OutputBuffer::new_write();
        let env = Environment::new(module, Rc::new(Vec::new()), StateMap::empty(), None);
        let result = add.try_step(out, env, &mut |_out2, _, _, _f| Ok(true), None);
        assert!(matches!(result, Err(KernelError::ArgumentType { .. })));
    }

    #[test]
    fn remove_next_on_empty_collection_fails_without_erroring() {
        let defaults = StateDefaults::new().with_default("L", Term::Collection(Collection::empty_list()));
        let module = Rc::new(Module::with_defaults(defaults));
        let remove = RemoveNext { target: "L".to_string(), pattern: ArgExpr::Atom(Atom::Int(1)) };
        let out = OutputBuffer::new_write();
        let env = Environment::new(module, Rc::new(Vec::new()), StateMap::empty(), None);
        let result = remove.try_step(out, env, &mut |_out2, _, _, _f| Ok(true), None).unwrap();
        assert!(!result);
    }

    #[test]
    fn cool_gates_commits_by_its_duration() {
        let emit = Rc::new(Chain::new(vec![Rc::new(Emit { tokens: vec![word("ping")] })]));
        let cool = Rc::new(Cool::new(2, emit)) as Rc<dyn Step<Module>>;
        let chain: Rc<Chain<Module>> = Rc::new(Chain::new(vec![cool]));
        let module = Rc::new(Module::empty());

        let (c1, o1) = run_chain(&chain, module.clone(), StateMap::empty());
        let (c2, _) = run_chain(&chain, module.clone(), StateMap::empty());
        let (c3, _) = run_chain(&chain, module.clone(), StateMap::empty());
        let (c4, o4) = run_chain(&chain, module, StateMap::empty());

        assert!(c1);
        assert_eq!(o1.unwrap(), "ping");
        assert!(!c2);
        assert!(!c3);
        assert!(c4);
        assert_eq!(o4.unwrap(), "ping");
    }

    #[test]
    fn sequence_advances_through_branches_then_fails() {
        let branches: Vec<Rc<Chain<Module>>> = vec!["A", "B", "C"]
            .into_iter()
            .map(|tok| Rc::new(Chain::new(vec![Rc::new(Emit { tokens: vec![word(tok)] }) as Rc<dyn Step<Module>>])))
            .collect();
        let sequence = Rc::new(Sequence::new(branches)) as Rc<dyn Step<Module>>;
        let chain: Rc<Chain<Module>> = Rc::new(Chain::new(vec![sequence]));
        let module = Rc::new(Module::empty());

        let (c1, o1) = run_chain(&chain, module.clone(), StateMap::empty());
        let (c2, o2) = run_chain(&chain, module.clone(), StateMap::empty());
        let (c3, o3) = run_chain(&chain, module.clone(), StateMap::empty());
        let (c4, _) = run_chain(&chain, module, StateMap::empty());

        assert_eq!((c1, o1.unwrap()), (true, "A".to_string()));
        assert_eq!((c2, o2.unwrap()), (true, "B".to_string()));
        assert_eq!((c3, o3.unwrap()), (true, "C".to_string()));
        assert!(!c4);
    }

    #[test]
    fn conjugate_verb_appends_s_when_flag_is_set() {
        let defaults = StateDefaults::new().with_default("Tps", Term::Atom(Atom::Bool(true)));
        let module = Rc::new(Module::with_defaults(defaults));
        let emit = Emit { tokens: vec![word("walk")] };
        let conjugate = ConjugateVerb { flag: "Tps".to_string() };
        let chain: Rc<Chain<Module>> = Rc::new(Chain::new(vec![
            Rc::new(emit) as Rc<dyn Step<Module>>,
            Rc::new(conjugate) as Rc<dyn Step<Module>>,
        ]));
        let (committed, out) = run_chain(&chain, module, StateMap::empty());
        assert!(committed);
        assert_eq!(out.unwrap(), "walks");
    }
}
