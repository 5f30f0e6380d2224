//! Token cursor
//!
//! A bounded, position-addressable view over the lexed token sequence. The
//! position starts at `-1`, before the first token. Every read is
//! bounds-checked: reading outside the range yields `CompileError::NotFound`,
//! never a silent truncation, and grammar rules key their loop termination
//! off that exact condition.

use crate::error::{CompileError, Result};

/// Skip blank tokens while moving or peeking.
pub const SKIP_EMPTY: bool = true;
/// Consider blank tokens like any other.
pub const INCLUDE_EMPTY: bool = false;

#[derive(Debug, Clone)]
pub struct Tokens {
    tokens: Vec<String>,
    index: isize,
}

impl Tokens {
    pub fn new(tokens: Vec<String>) -> Self {
        Tokens { tokens, index: -1 }
    }

    /// Current cursor position (`-1` before the first token).
    pub fn position(&self) -> isize {
        self.index
    }

    /// Forces the cursor back to a saved position.
    pub fn set_position(&mut self, index: isize) {
        self.index = index;
    }

    /// Token at an absolute position.
    pub fn at(&self, index: isize) -> Result<String> {
        if index < 0 {
            return Err(CompileError::NotFound);
        }

        self.tokens
            .get(index as usize)
            .cloned()
            .ok_or(CompileError::NotFound)
    }

    /// Token at the cursor position.
    pub fn current(&self) -> Result<String> {
        self.at(self.index)
    }

    /// Moves the cursor forward by one and returns the new current token.
    /// With `skip_empty`, keeps moving past blank tokens.
    pub fn advance(&mut self, skip_empty: bool) -> Result<String> {
        self.index += 1;

        if skip_empty {
            while matches!(self.current(), Ok(token) if token.trim().is_empty()) {
                self.index += 1;
            }
        }

        self.current()
    }

    /// Moves the cursor backward by one and returns the new current token.
    /// With `skip_empty`, keeps moving past blank tokens.
    pub fn rewind(&mut self, skip_empty: bool) -> Result<String> {
        self.index -= 1;

        if skip_empty {
            while matches!(self.current(), Ok(token) if token.trim().is_empty()) {
                self.index -= 1;
            }
        }

        self.current()
    }

    /// Non-mutating lookahead, `offset` positions after the cursor
    /// (`offset >= 1`). With `skip_empty`, blank tokens do not count and the
    /// lookahead extends until a non-blank token qualifies.
    pub fn peek_next(&self, offset: isize, skip_empty: bool) -> Result<String> {
        debug_assert!(offset >= 1, "peek_next offset must be at least 1");

        let mut offset = offset;

        loop {
            let token = self.at(self.index + offset)?;

            if skip_empty && token.trim().is_empty() {
                offset += 1;
                continue;
            }

            return Ok(token);
        }
    }

    /// Non-mutating lookbehind, `offset` positions before the cursor
    /// (`offset <= -1`). With `skip_empty`, blank tokens do not count.
    pub fn peek_previous(&self, offset: isize, skip_empty: bool) -> Result<String> {
        debug_assert!(offset <= -1, "peek_previous offset must be at most -1");

        let mut offset = offset;

        loop {
            let token = self.at(self.index + offset)?;

            if skip_empty && token.trim().is_empty() {
                offset -= 1;
                continue;
            }

            return Ok(token);
        }
    }
}
