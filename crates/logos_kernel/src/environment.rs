//! Binding environment: the per-call bundle a step chain threads through
//! its continuations.
//!
//! `Environment` is generic over the module type `M` so that this crate
//! never needs to know about tasks, methods, or step variants — those are
//! `logos_interp`'s concern. All this crate needs from a module is a
//! shared, immutable handle plus (via [`StateDefaults`]) a table of
//! default values for unbound state elements.

use logos_data::{Bindings, StateMap};
use logos_term::LogicVar;
use std::rc::Rc;

use crate::frame::Frame;

/// Copy-on-derive bundle of everything a step needs to execute: the
/// enclosing module, this method's locals, the current binding list and
/// state map, and the caller's frame. Cheap to clone — every field is
/// either `Rc`-shared or itself a persistent value type.
pub struct Environment<M> {
    pub module: Rc<M>,
    pub locals: Rc<Vec<LogicVar>>,
    pub bindings: Bindings,
    pub state: StateMap,
    pub frame: Option<Rc<Frame>>,
}

impl<M> Environment<M> {
    pub fn new(module: Rc<M>, locals: Rc<Vec<LogicVar>>, state: StateMap, frame: Option<Rc<Frame>>) -> Self {
        Environment { module, locals, bindings: Bindings::empty(), state, frame }
    }

    /// The logic variable occupying local slot `index`, as resolved
    /// against the method's fresh-locals array at frame-entry time.
    pub fn local(&self, index: usize) -> Option<&LogicVar> {
        self.locals.get(index)
    }

    pub fn with_bindings(&self, bindings: Bindings) -> Self {
        Environment { module: self.module.clone(), locals: self.locals.clone(), bindings, state: self.state.clone(), frame: self.frame.clone() }
    }

    pub fn with_state(&self, state: StateMap) -> Self {
        Environment { module: self.module.clone(), locals: self.locals.clone(), bindings: self.bindings.clone(), state, frame: self.frame.clone() }
    }
}

impl<M> Clone for Environment<M> {
    fn clone(&self) -> Self {
        Environment {
            module: self.module.clone(),
            locals: self.locals.clone(),
            bindings: self.bindings.clone(),
            state: self.state.clone(),
            frame: self.frame.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos_term::VarFactory;

    struct DummyModule;

    #[test]
    fn with_bindings_leaves_other_fields_untouched() {
        let factory = VarFactory::new();
        let locals = Rc::new(vec![factory.fresh("X")]);
        let env = Environment::new(Rc::new(DummyModule), locals.clone(), StateMap::empty(), None);
        let extended = env.bindings.extend(locals[0].clone(), logos_term::Term::Atom(logos_term::Atom::Int(1)));
        let env2 = env.with_bindings(extended);
        assert!(Rc::ptr_eq(&env.locals, &env2.locals));
    }
}
