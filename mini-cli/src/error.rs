//! Top-level error type for the `mini` driver.
//!
//! Wraps each phase's own `thiserror` error (`mini_lex::LexError`,
//! `mini_par::ParseError`, `mini_eval::EvalError`) plus the driver's own
//! IO/usage failures, the way `faxt::error::FaxtError` wraps its
//! subsystems' errors for a single process-level `Display`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read '{path}': {source}")]
    Io { path: String, source: std::io::Error },

    #[error(transparent)]
    Lex(#[from] mini_lex::LexError),

    #[error(transparent)]
    Parse(#[from] mini_par::ParseError),

    #[error(transparent)]
    Eval(#[from] mini_eval::EvalError),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
