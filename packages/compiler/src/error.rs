//! Compiler errors
//!
//! Two conditions cover the whole core: `NotFound` for bounds-checked cursor
//! reads past the token range, and `Syntax` for fatal template errors.
//! `NotFound` doubles as the end-of-construct signal; grammar loops whose
//! termination condition is "ran out of lookahead" convert it into a normal
//! exit, everywhere else it propagates.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Cursor read outside the bounded token range.
    #[error("no token at cursor position")]
    NotFound,

    /// Malformed template; aborts the whole compilation.
    #[error("syntax error: {0}")]
    Syntax(String),
}

impl CompileError {
    pub fn syntax(message: impl Into<String>) -> Self {
        CompileError::Syntax(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;

/// Maps `NotFound` to `None` so a grammar rule can terminate a loop on an
/// exhausted cursor while still propagating real failures.
pub(crate) fn end_of_input<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CompileError::NotFound) => Ok(None),
        Err(error) => Err(error),
    }
}
