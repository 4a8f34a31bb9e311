//! Step abstraction and chain runner: the `try`/`continue` protocol every
//! step variant implements, and the linked-chain driver that threads a
//! success continuation through a method body.
//!
//! There is no explicit fail-continuation: the native call stack plays
//! that role. A step either commits by calling `k` and propagating `true`,
//! or fails by returning `false` after calling `k` zero or more times (each
//! call having itself returned `false`). Nothing is undone on failure —
//! correctness follows entirely from the persistence of `Bindings` and
//! `StateMap` and from the output buffer's length-partition discipline.
//!
//! A step that hits a contract violation (wrong argument shape, an
//! unbound value where a ground one was required, and so on) does not
//! return `false` — an ordinary `false` is indistinguishable from a
//! pattern mismatch and backtracking would swallow it. Instead it returns
//! `Err`, which `?` propagates straight up through every enclosing
//! `try_step`/`continue_from` frame, bypassing the backtrack protocol
//! entirely. This is this crate's rendering of "errors unwind the native
//! stack directly; backtracking does not catch them."

use logos_data::{Bindings, OutputBuffer, StateMap};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::Result;
use crate::frame::Frame;

/// The success continuation a step invokes on commit: new output view,
/// new bindings, new state, and the frame to attribute to whatever runs
/// next. Returns whether the overall call eventually committed.
pub type Continuation<'a> = dyn FnMut(OutputBuffer, Bindings, StateMap, Option<Rc<Frame>>) -> Result<bool> + 'a;

/// A single unit of execution inside a method body.
pub trait Step<M> {
    /// Attempt this step. Must return `Ok(true)` only after `k` has been
    /// invoked (directly or transitively) and returned `Ok(true)`;
    /// otherwise must return `Ok(false)`, having left `out`, `env`, and
    /// `predecessor`'s referents unchanged from this call's perspective (no
    /// in-place mutation survives an `Ok(false)` return, with the sole
    /// documented exception of the `cool` fuse and conjugate-verb steps).
    /// An `Err` return is a contract violation, not a backtrack signal, and
    /// must be propagated rather than converted to `Ok(false)`.
    fn try_step(
        &self,
        out: OutputBuffer,
        env: Environment<M>,
        k: &mut Continuation<'_>,
        predecessor: Option<Rc<Frame>>,
    ) -> Result<bool>;
}

/// A linked sequence of steps, run left to right with a single success
/// continuation threaded through all of them.
pub struct Chain<M> {
    steps: Vec<Rc<dyn Step<M>>>,
}

impl<M> Chain<M> {
    pub fn new(steps: Vec<Rc<dyn Step<M>>>) -> Self {
        Chain { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs step `index` onward. If `index` is past the end, invokes the
    /// terminal continuation directly with the current environment's
    /// fields; otherwise dispatches to that step, wiring its commit to
    /// resume the chain at `index +1`.
    pub fn continue_from(
        self: &Rc<Self>,
        index: usize,
        out: OutputBuffer,
        env: Environment<M>,
        k: &mut Continuation<'_>,
        predecessor: Option<Rc<Frame>>,
    ) -> Result<bool> {
        match self.steps.get(index) {
            Some(step) => {
                let chain = self.clone();
                let module = env.module.clone();
                let locals = env.locals.clone();
                step.try_step(
                    out,
                    env,
                    &mut |out2, bindings2, state2, frame2| {
                        let next_env = Environment {
                            module: module.clone(),
                            locals: locals.clone(),
                            bindings: bindings2,
                            state: state2,
                            frame: frame2.clone(),
                        };
                        chain.continue_from(index + 1, out2, next_env, &mut *k, frame2)
                    },
                    predecessor,
                )
            }
            None => k(out, env.bindings, env.state, predecessor),
        }
    }

    /// Runs the whole chain from the start, or — if it is empty — invokes
    /// `k` directly, matching method bodies with no steps.
    pub fn run(
        self: &Rc<Self>,
        out: OutputBuffer,
        env: Environment<M>,
        k: &mut Continuation<'_>,
        predecessor: Option<Rc<Frame>>,
    ) -> Result<bool> {
        if self.is_empty() {
            return k(out, env.bindings, env.state, predecessor);
        }
        self.continue_from(0, out, env, k, predecessor)
    }
}
