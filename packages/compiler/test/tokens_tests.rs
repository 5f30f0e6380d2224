//! Token Cursor Tests

use phpx_compiler::tokens::{Tokens, INCLUDE_EMPTY, SKIP_EMPTY};
use phpx_compiler::CompileError;

fn cursor(tokens: &[&str]) -> Tokens {
    Tokens::new(tokens.iter().map(|token| token.to_string()).collect())
}

#[test]
fn starts_before_the_first_token() {
    let tokens = cursor(&["a", "b"]);

    assert_eq!(tokens.position(), -1);
    assert_eq!(tokens.current(), Err(CompileError::NotFound));
}

#[test]
fn advance_returns_the_new_current_token() {
    let mut tokens = cursor(&["a", "b"]);

    assert_eq!(tokens.advance(INCLUDE_EMPTY), Ok("a".to_string()));
    assert_eq!(tokens.current(), Ok("a".to_string()));
    assert_eq!(tokens.advance(INCLUDE_EMPTY), Ok("b".to_string()));
    assert_eq!(tokens.advance(INCLUDE_EMPTY), Err(CompileError::NotFound));
}

#[test]
fn advance_skips_blank_tokens_when_asked() {
    let mut tokens = cursor(&["a", " ", "\n", "b"]);

    assert_eq!(tokens.advance(INCLUDE_EMPTY), Ok("a".to_string()));
    assert_eq!(tokens.advance(SKIP_EMPTY), Ok("b".to_string()));
    assert_eq!(tokens.position(), 3);
}

#[test]
fn rewind_moves_backward() {
    let mut tokens = cursor(&["a", " ", "b"]);

    tokens.set_position(2);
    assert_eq!(tokens.rewind(INCLUDE_EMPTY), Ok(" ".to_string()));
    assert_eq!(tokens.rewind(INCLUDE_EMPTY), Ok("a".to_string()));
    assert_eq!(tokens.rewind(INCLUDE_EMPTY), Err(CompileError::NotFound));
}

#[test]
fn rewind_skips_blank_tokens_when_asked() {
    let mut tokens = cursor(&["a", " ", "\n", "b"]);

    tokens.set_position(3);
    assert_eq!(tokens.rewind(SKIP_EMPTY), Ok("a".to_string()));
    assert_eq!(tokens.position(), 0);
}

#[test]
fn peek_does_not_move_the_cursor() {
    let mut tokens = cursor(&["a", "b", "c"]);

    tokens.advance(INCLUDE_EMPTY).ok();
    assert_eq!(tokens.peek_next(1, INCLUDE_EMPTY), Ok("b".to_string()));
    assert_eq!(tokens.peek_next(2, INCLUDE_EMPTY), Ok("c".to_string()));
    assert_eq!(
        tokens.peek_next(3, INCLUDE_EMPTY),
        Err(CompileError::NotFound)
    );
    assert_eq!(tokens.position(), 0);
}

#[test]
fn peek_skips_blank_tokens_when_asked() {
    let mut tokens = cursor(&["a", " ", "\n", "b", " ", "c"]);

    tokens.advance(INCLUDE_EMPTY).ok();
    assert_eq!(tokens.peek_next(1, SKIP_EMPTY), Ok("b".to_string()));

    // The offset addresses a raw position first; the skip only slides past
    // blanks from that landing spot. Offset 2 lands on "\n" and slides to
    // "b", it does not count non-blank tokens.
    assert_eq!(tokens.peek_next(2, SKIP_EMPTY), Ok("b".to_string()));

    // From "\n", offset 2 lands on the blank after "b" and slides to "c".
    tokens.set_position(2);
    assert_eq!(tokens.peek_next(2, SKIP_EMPTY), Ok("c".to_string()));
}

#[test]
fn peek_previous_looks_behind() {
    let mut tokens = cursor(&["a", " ", "b"]);

    tokens.set_position(2);
    assert_eq!(tokens.peek_previous(-1, INCLUDE_EMPTY), Ok(" ".to_string()));
    assert_eq!(tokens.peek_previous(-1, SKIP_EMPTY), Ok("a".to_string()));
    assert_eq!(
        tokens.peek_previous(-3, INCLUDE_EMPTY),
        Err(CompileError::NotFound)
    );
}

#[test]
fn at_is_bounds_checked() {
    let tokens = cursor(&["a"]);

    assert_eq!(tokens.at(0), Ok("a".to_string()));
    assert_eq!(tokens.at(-1), Err(CompileError::NotFound));
    assert_eq!(tokens.at(1), Err(CompileError::NotFound));
}

#[test]
fn set_position_restores_a_saved_position() {
    let mut tokens = cursor(&["a", "b", "c"]);

    tokens.advance(INCLUDE_EMPTY).ok();
    let saved = tokens.position();
    tokens.advance(INCLUDE_EMPTY).ok();
    tokens.advance(INCLUDE_EMPTY).ok();

    tokens.set_position(saved);
    assert_eq!(tokens.current(), Ok("a".to_string()));
}
