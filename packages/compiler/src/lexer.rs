//! Template lexer
//!
//! Splits raw template text into an ordered token sequence with one
//! delimiter-priority pass. Multi-character delimiters are listed before any
//! of their single-character prefixes; the alternation's leftmost-first
//! semantics then guarantee they win at every position. Anything between
//! delimiter matches becomes an opaque text token, so tokenization is total:
//! it never fails, and concatenating the tokens in order reproduces the
//! input byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;

/// Delimiter patterns in priority order. Order matters: at any position the
/// first matching alternative wins, so every multi-character token precedes
/// its prefixes (`</>` before `</` before `<`, `!==` before `!=` before `!`).
/// `&&`, `||` and `:` are deliberately absent; they survive as opaque text
/// runs and are recognized later by the operator compiler.
const DELIMITER_PATTERNS: &[&str] = &[
    // special doctype tag
    "<!doctype html>",
    // comments
    "<!--",
    "-->",
    "//",
    r"/\*",
    r"\*/",
    // escaped quotes
    r#"\\""#,
    r"\\'",
    // quotes
    "\"",
    "'",
    // comparison operators
    ">=",
    "<=",
    "=>",
    "<=>",
    "!==",
    "===",
    "!=",
    // assignment operators
    "=",
    "-=",
    r"\+=",
    r"\.=",
    r"\*=",
    "/=",
    r"\*\*=",
    "&=",
    r"\|=",
    r"\^=",
    "<<=",
    ">>=",
    // nullish coalescing
    r"\?\?",
    // negation
    "!",
    // variables
    r"\$",
    // object operator
    "->",
    // fragment
    "<>",
    "</>",
    // tags
    "</",
    "/>",
    "<",
    ">",
    // brackets
    r"\{",
    r"\}",
    r"\(",
    r"\)",
    r"\[",
    r"\]",
    // punctuation
    ";",
    ",",
    r"\.",
    r"\?",
    // spaces
    "\n",
    r"\s+",
];

static DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&DELIMITER_PATTERNS.join("|")).expect("delimiter patterns compile"));

/// Splits `content` into delimiter and text tokens. Total and pure; the
/// concatenation of the returned tokens equals `content` exactly.
pub fn tokenize(content: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for matched in DELIMITERS.find_iter(content) {
        if matched.start() > last {
            tokens.push(content[last..matched.start()].to_string());
        }

        tokens.push(matched.as_str().to_string());
        last = matched.end();
    }

    if last < content.len() {
        tokens.push(content[last..].to_string());
    }

    tokens
}
