#![deny(clippy::all)]

//! phpx compiler
//!
//! Compiles JSX-style templates (tags, fragments, embedded expressions and
//! plain PHP statements) into PHP source text that calls into the `Phpx\Jsx`
//! rendering runtime.
//!
//! The pipeline is a single synchronous pass: the lexer splits the template
//! into tokens, the cursor provides bounds-checked lookahead over them, and
//! the transpiler walks the grammar emitting `Jsx::jsx(...)` calls, with the
//! operator compiler rewriting value expressions into lazy, value-preserving
//! short-circuit form.

mod error;
pub mod lexer;
pub mod operators;
pub mod strings;
pub mod tokens;
pub mod transpiler;

pub use error::{CompileError, Result};
pub use transpiler::transpile;
