//! Task dispatch, the module task table, and the host call entry point.
//!
//! `Module::call` is the one function an embedder calls: it dispatches to
//! a named task and, if some method's step chain commits, returns the
//! rendered output string. Everything else in this crate exists to make
//! that one call meaningful.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use logos_data::StateDefaults;
use logos_kernel::{unify, Chain, Continuation, Environment, Frame, KernelError, OutputBuffer, Result, Term, VarFactory};

use crate::argexpr::ArgExpr;

/// A host-implemented task, invoked identically to a compound one: same
/// argument list, buffer, environment, predecessor frame, and
/// continuation contract. May enumerate multiple solutions by invoking
/// `k` in a loop, returning on the first commit.
pub trait PrimitiveTask {
    fn call(
        &self,
        args: &[Term],
        out: OutputBuffer,
        env: Environment<Module>,
        predecessor: Option<Rc<Frame>>,
        k: &mut Continuation<'_>,
    ) -> Result<bool>;
}

/// One method of a compound task: an argument pattern to unify the call's
/// actual arguments against, how many fresh locals to allocate for it, and
/// the step chain to run once the pattern matches.
pub struct Method {
    pub local_count: usize,
    pub argument_pattern: Vec<ArgExpr>,
    pub step_chain: Rc<Chain<Module>>,
}

/// A compound task: an ordered list of methods, tried in definition order.
pub struct Task {
    pub methods: Vec<Method>,
}

pub enum TaskEntry {
    Compound(Task),
    Primitive(Rc<dyn PrimitiveTask>),
}

/// The immutable task table and default-value table a running program is
/// built from, plus the two genuinely-global mutable fields the engine
/// needs: a fresh-variable counter and a heap-insertion sequence counter
/// for `add`'s priority-tie-breaking.
pub struct Module {
    tasks: HashMap<String, TaskEntry>,
    defaults: StateDefaults,
    var_factory: VarFactory,
    heap_seq: AtomicU64,
}

impl Module {
    pub fn new(tasks: HashMap<String, TaskEntry>, defaults: StateDefaults) -> Module {
        Module { tasks, defaults, var_factory: VarFactory::new(), heap_seq: AtomicU64::new(0) }
    }

    pub fn empty() -> Module {
        Module::new(HashMap::new(), StateDefaults::new())
    }

    pub fn with_defaults(defaults: StateDefaults) -> Module {
        Module::new(HashMap::new(), defaults)
    }

    pub fn defaults(&self) -> &StateDefaults {
        &self.defaults
    }

    pub fn next_heap_seq(&self) -> u64 {
        self.heap_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Dispatches `task_name` with `args`, and if a solution commits,
    /// returns the rendered output string; otherwise `None`.
    ///
    /// Each call starts from a fresh, empty binding list and state map —
    /// state does not persist across separate calls to this method, only
    /// within the execution of a single one.
    pub fn call(self: &Rc<Module>, task_name: &str, args: Vec<Term>) -> Result<Option<String>> {
        let env = Environment::new(self.clone(), Rc::new(Vec::new()), logos_data::StateMap::empty(), None);
        let out = OutputBuffer::new_write();
        let mut rendered = None;
        let committed = dispatch(self, task_name, args, &env, out, None, &mut |out2, _bindings2, _state2, _frame2| {
            rendered = Some(out2.as_string());
            Ok(true)
        })?;
        Ok(if committed { rendered } else { None })
    }
}

/// Enumerates `task_name`'s methods in definition order (component I,
/// "task dispatch"). For each: allocate fresh locals, unify the actual
/// arguments against the pattern, and on success run the step chain. The
/// first method whose chain commits wins; if none do, dispatch fails.
///
/// For a primitive task, skips pattern matching entirely and hands the
/// caller's own environment straight to the primitive's `call`.
pub fn dispatch(
    module: &Rc<Module>,
    task_name: &str,
    args: Vec<Term>,
    caller_env: &Environment<Module>,
    out: OutputBuffer,
    predecessor: Option<Rc<Frame>>,
    k: &mut Continuation<'_>,
) -> Result<bool> {
    let entry = match module.tasks.get(task_name) {
        Some(entry) => entry,
        None => return Err(KernelError::Syntax(format!("unknown task '{}'", task_name))),
    };

    match entry {
        TaskEntry::Primitive(prim) => {
            let prim = prim.clone();
            prim.call(&args, out, caller_env.clone(), predecessor, k)
        }
        TaskEntry::Compound(task) => {
            for method in &task.methods {
                let locals: Vec<_> = (0..method.local_count)
                    .map(|i| module.var_factory.fresh(format!("_{}", i)))
                    .collect();
                let locals = Rc::new(locals);
                let pattern_env = Environment {
                    module: module.clone(),
                    locals: locals.clone(),
                    bindings: caller_env.bindings.clone(),
                    state: caller_env.state.clone(),
                    frame: caller_env.frame.clone(),
                };

                if method.argument_pattern.len() != args.len() {
                    continue;
                }

                let mut bindings = pattern_env.bindings.clone();
                let mut matched = true;
                for (actual, pattern_expr) in args.iter().zip(method.argument_pattern.iter()) {
                    let pattern_term = pattern_expr.eval(&pattern_env);
                    match unify(actual, &pattern_term, &bindings) {
                        Some(next) => bindings = next,
                        None => {
                            matched = false;
                            break;
                        }
                    }
                }
                if !matched {
                    continue;
                }

                let frame = Rc::new(Frame::new(task_name.to_string(), args.clone(), predecessor.clone()));
                let env = Environment { bindings, frame: Some(frame.clone()), ..pattern_env };

                let committed = if method.step_chain.is_empty() {
                    k(out.clone(), env.bindings.clone(), env.state.clone(), Some(frame))?
                } else {
                    method.step_chain.run(out.clone(), env, k, Some(frame))?
                };
                if committed {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}
