//! Call-frame chain used for stack-trace reconstruction.
//!
//! Frames are advisory only — they play no part in unification or
//! backtracking. Each method-dispatch attempt allocates one, linking to the
//! caller's frame, and records the post-unification bindings so a host can
//! reconstruct "how did we get here" after an error.

use logos_term::Term;
use std::rc::Rc;

/// One entry of the call-frame chain: the task that was entered, the
/// arguments it was called with, and a link to whoever called it.
#[derive(Debug)]
pub struct Frame {
    pub task_name: Rc<str>,
    pub args: Vec<Term>,
    pub caller: Option<Rc<Frame>>,
}

impl Frame {
    pub fn new(task_name: impl Into<Rc<str>>, args: Vec<Term>, caller: Option<Rc<Frame>>) -> Frame {
        Frame { task_name: task_name.into(), args, caller }
    }

    /// Innermost-first list of task names, for diagnostics.
    pub fn trace(self: &Rc<Self>) -> Vec<Rc<str>> {
        let mut names = Vec::new();
        let mut cur = Some(self.clone());
        while let Some(frame) = cur {
            names.push(frame.task_name.clone());
            cur = frame.caller.clone();
        }
        names
    }
}
