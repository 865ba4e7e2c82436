//! Host-callable registration protocol.
//!
//! Some built-ins need to call back into user-defined functions (a
//! hypothetical `list_map` invoking its callback argument, for instance).
//! Rather than have this crate depend on whatever registers builtins (or
//! have builtins depend on the evaluator module that calls them — a
//! cycle either way), `CallContext` carries a callback closure that
//! performs the call using the evaluator already on the stack.

use mini_util::Span;

use crate::error::EvalError;
use crate::value::ValueAtom;

pub struct CallContext<'a> {
    evaluate_call: &'a mut dyn FnMut(ValueAtom, Vec<ValueAtom>, Span) -> Result<ValueAtom, EvalError>,
}

impl<'a> CallContext<'a> {
    pub fn new(evaluate_call: &'a mut dyn FnMut(ValueAtom, Vec<ValueAtom>, Span) -> Result<ValueAtom, EvalError>) -> Self {
        Self { evaluate_call }
    }

    /// Invoke `function` (closure or builtin) with `args`, as if it had
    /// been called from `span` in the source.
    pub fn call(&mut self, function: ValueAtom, args: Vec<ValueAtom>, span: Span) -> Result<ValueAtom, EvalError> {
        (self.evaluate_call)(function, args, span)
    }
}

pub trait Builtin {
    fn name(&self) -> &str;
    fn call(&self, args: Vec<ValueAtom>, ctx: &mut CallContext) -> Result<ValueAtom, EvalError>;
}
