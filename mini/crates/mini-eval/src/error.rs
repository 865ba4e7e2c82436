//! Evaluator error taxonomy.
//!
//! Every variant carries the `Span` of the expression that failed, so a
//! host (the CLI, a REPL) can print `line:column` alongside the message
//! without threading position information through the call stack by hand.

use mini_util::Span;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Name Error at {span}: identifier '{name}' is not defined")]
    NameError { name: String, span: Span },

    #[error("Type Error at {span}: {message}")]
    TypeError { message: String, span: Span },

    #[error("Index Error at {span}: {message}")]
    IndexError { message: String, span: Span },

    #[error("Key Error at {span}: map does not contain key '{key}'")]
    KeyError { key: String, span: Span },

    #[error("Assignment Error at {span}: {message}")]
    AssignmentError { message: String, span: Span },

    /// Tuples are immutable (`Rc<[ValueAtom]>`); a path-assignment that
    /// would have to mutate one in place is rejected rather than silently
    /// no-opping.
    #[error("Type Error at {span}: cannot assign through an immutable {kind} value")]
    ImmutableTarget { kind: &'static str, span: Span },

    #[error("Type Error at {span}: operator '{op}' is not implemented")]
    NotImplementedOperator { op: &'static str, span: Span },
}

pub type EvalResult<T> = Result<T, EvalError>;
