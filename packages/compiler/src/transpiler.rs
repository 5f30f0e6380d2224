//! Parser / code generator
//!
//! Recursive-descent grammar over the token cursor. Statements are compiled
//! left to right; tags, fragments, embedded expressions and variable
//! references each have their own rule, and the right-hand side of every
//! statement goes through the operator compiler so `&&`/`||` runs keep their
//! operand values. The generated text calls into the `Phpx\Jsx` runtime:
//! `Jsx::jsx('name', [...])` for tags and `implode("\n", [...])` for
//! fragments.
//!
//! `CompileError::NotFound` terminates exactly the loops whose end condition
//! is an exhausted lookahead (statement and block segmenting, attribute
//! lists, child lists, raw script/style bodies); everywhere else it
//! propagates and fails the template.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{end_of_input, CompileError, Result};
use crate::lexer;
use crate::operators;
use crate::strings;
use crate::tokens::{Tokens, INCLUDE_EMPTY, SKIP_EMPTY};

/// Elements that may never carry children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr", "image",
    "img", "input", "isindex", "keygen", "link", "menuitem", "meta", "nextid", "param", "source",
    "track", "wbr",
];

/// A `\Namespace::`-style qualifier preceding a static variable or constant.
static STATIC_VARIABLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\\\w+)+::$").expect("static prefix pattern compiles"));

/// Attribute names: a letter followed by letters, digits and hyphens, with
/// at most one `:` separating two such parts (`data-x`, `aria:label`).
static ATTRIBUTE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*(?::[a-zA-Z][a-zA-Z0-9-]*)?$")
        .expect("attribute pattern compiles")
});

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("identifier pattern compiles"));

/// An attribute value as it appears in the generated `Jsx::jsx` call: either
/// expression text emitted inline, or the list of compiled children.
#[derive(Debug, Clone)]
enum AttributeValue {
    Expression(String),
    Children(Vec<String>),
}

fn closing_bracket(open: &str) -> Option<&'static str> {
    match open {
        "[" => Some("]"),
        "{" => Some("}"),
        "(" => Some(")"),
        _ => None,
    }
}

fn is_closing_bracket(token: &str) -> bool {
    matches!(token, "]" | "}" | ")")
}

fn is_tag_terminator(token: &str) -> bool {
    matches!(token, ">" | "/>")
}

/// Blank token made of spaces and tabs only (no newline).
fn is_inline_blank(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c == ' ' || c == '\t')
}

/// Blank token of any whitespace.
fn is_blank(token: &str) -> bool {
    !token.is_empty() && token.trim().is_empty()
}

fn generate_tag_php(name: &str, attributes: &IndexMap<String, AttributeValue>) -> String {
    let start = format!("Jsx::jsx('{name}', [");
    let end = "])";

    let mut code: Vec<String> = Vec::new();

    for (attribute, value) in attributes {
        match value {
            AttributeValue::Expression(value) => {
                code.push(strings::indent(&format!("'{attribute}' => {value},")));
            }
            AttributeValue::Children(rows) => {
                code.push(strings::indent(&format!("'{attribute}' => [")));

                for row in rows {
                    code.push(strings::indent(&strings::indent(&format!("{row},"))));
                }

                code.push(strings::indent("],"));
            }
        }
    }

    if code.is_empty() {
        return format!("{start}{end}");
    }

    format!("{start}\n{}\n{end}", code.join("\n"))
}

/// Copies tokens verbatim until the next token equals `until`, which is left
/// unconsumed.
fn compile_until(tokens: &mut Tokens, until: &str) -> Result<String> {
    let mut result = String::new();

    while tokens.peek_next(1, INCLUDE_EMPTY)? != until {
        result.push_str(&tokens.advance(INCLUDE_EMPTY)?);
    }

    Ok(result)
}

/// Reads a tag name: tokens after `<` up to the first whitespace, `>` or
/// `/>` token.
fn compile_tag_name(tokens: &mut Tokens) -> Result<String> {
    let mut name = tokens.advance(INCLUDE_EMPTY)?;

    loop {
        let next = tokens.peek_next(1, INCLUDE_EMPTY)?;

        if next.trim().is_empty() || is_tag_terminator(&next) {
            return Ok(name);
        }

        name.push_str(&tokens.advance(INCLUDE_EMPTY)?);
    }
}

/// Consumes verbatim text up to the next tag, fragment or expression opener,
/// stopping at line boundaries so every line becomes its own text node.
/// Blank text yields no node at all.
fn compile_text_node(tokens: &mut Tokens) -> Result<Option<String>> {
    let mut content = String::new();

    loop {
        let next = tokens.peek_next(1, INCLUDE_EMPTY)?;

        if matches!(next.as_str(), "<" | "</" | "<>" | "{") {
            break;
        }

        content.push_str(&tokens.advance(INCLUDE_EMPTY)?);

        if tokens.peek_next(1, INCLUDE_EMPTY)?.contains('\n') {
            break;
        }
    }

    let content = content.trim();

    Ok((!content.is_empty()).then(|| strings::escape(content)))
}

/// Copies a quoted string verbatim, re-wrapped in its original quotes.
fn compile_quoted_string(tokens: &mut Tokens) -> Result<String> {
    let quote = tokens.advance(INCLUDE_EMPTY)?;
    let string = compile_until(tokens, &quote)?;
    tokens.advance(INCLUDE_EMPTY)?;

    Ok(format!("{quote}{string}{quote}"))
}

/// Captures a `script`/`style` body unparsed, up to the matching closing
/// tag, and emits each dedented line as its own escaped string literal.
fn compile_raw_body(tokens: &mut Tokens) -> Result<Vec<String>> {
    let mut content = String::new();

    loop {
        let closing = match end_of_input(tokens.peek_next(1, INCLUDE_EMPTY))? {
            Some(next) if next == "</" => {
                let ahead = end_of_input(tokens.peek_next(2, INCLUDE_EMPTY))?;
                matches!(ahead.as_deref(), Some("script" | "style"))
            }
            Some(_) => false,
            None => break,
        };

        if closing {
            break;
        }

        match end_of_input(tokens.advance(INCLUDE_EMPTY))? {
            Some(token) => content.push_str(&token),
            None => break,
        }
    }

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let content = strings::remove_common_indentation(&content);

    Ok(content.split('\n').map(strings::escape).collect())
}

/// Consumes the closing `</name>` run the children loop stopped in front of:
/// one name immediately after `</`, then the mandatory `>`.
fn close_tag(tokens: &mut Tokens) -> Result<()> {
    tokens.advance(INCLUDE_EMPTY)?;

    if tokens.peek_next(1, INCLUDE_EMPTY)?.trim().is_empty() {
        return Err(CompileError::syntax("missing closing `>`"));
    }

    compile_tag_name(tokens)?;

    if tokens.advance(INCLUDE_EMPTY)? != ">" {
        return Err(CompileError::syntax("missing closing `>`"));
    }

    Ok(())
}

/// Rejects a void element that was written with a matching closing tag
/// (and therefore with child content). The scan looks ahead without
/// consuming and stops at the first closing marker.
fn reject_void_children(tokens: &Tokens, name: &str) -> Result<()> {
    let mut index = tokens.position() + 1;

    loop {
        let token = match tokens.at(index) {
            Ok(token) => token,
            Err(_) => break,
        };

        if token == "</>" {
            break;
        }

        if token == "</" {
            let mut closing = String::new();
            let mut ahead = index + 1;

            while let Ok(part) = tokens.at(ahead) {
                if part == ">" {
                    break;
                }

                closing.push_str(&part);
                ahead += 1;
            }

            if closing.trim() == name {
                return Err(CompileError::syntax(format!(
                    "void element <{name}> must not have children"
                )));
            }

            break;
        }

        index += 1;
    }

    Ok(())
}

/// Compiles `<name attr...>children</name>`, `<name attr.../>` or a raw
/// `<!...>` doctype/comment run into a `Jsx::jsx` call (or an escaped text
/// literal for the raw case).
fn compile_tag(tokens: &mut Tokens) -> Result<String> {
    if tokens.peek_next(2, INCLUDE_EMPTY)? == "!" {
        let mut content = compile_until(tokens, ">")?;
        content.push_str(&tokens.advance(INCLUDE_EMPTY)?);

        return Ok(strings::escape(&content));
    }

    // A `<` followed by whitespace is a less-than operator, not a tag.
    if tokens.peek_next(2, INCLUDE_EMPTY)?.trim().is_empty() {
        return tokens.advance(INCLUDE_EMPTY);
    }

    tokens.advance(INCLUDE_EMPTY)?;
    let name = compile_tag_name(tokens)?.trim().to_string();

    let mut attributes: IndexMap<String, AttributeValue> = IndexMap::new();

    loop {
        let next = match end_of_input(tokens.peek_next(1, SKIP_EMPTY))? {
            Some(next) => next,
            None => break,
        };

        if is_tag_terminator(&next) {
            break;
        }

        let attribute = tokens.advance(SKIP_EMPTY)?;

        if !ATTRIBUTE_NAME.is_match(&attribute) {
            return Err(CompileError::syntax(format!(
                "unexpected attribute: {attribute}"
            )));
        }

        let mut value = AttributeValue::Expression("true".to_string());

        if matches!(tokens.peek_next(1, SKIP_EMPTY), Ok(token) if token == "=") {
            tokens.advance(SKIP_EMPTY)?;

            value = match tokens.peek_next(1, INCLUDE_EMPTY)?.as_str() {
                "\"" | "'" => AttributeValue::Expression(compile_quoted_string(tokens)?),
                "{" => AttributeValue::Expression(compile_expression(tokens)?),
                other => {
                    return Err(CompileError::syntax(format!(
                        "unexpected value for attribute `{attribute}`: `{other}`"
                    )));
                }
            };
        }

        attributes.insert(attribute, value);
    }

    let mut children: Vec<String> = Vec::new();
    let terminator = tokens.advance(SKIP_EMPTY)?;

    if terminator == ">" {
        if VOID_ELEMENTS.contains(&name.as_str()) {
            reject_void_children(tokens, &name)?;
        } else {
            if name == "script" || name == "style" {
                children = compile_raw_body(tokens)?;
            } else {
                loop {
                    let next = match end_of_input(tokens.peek_next(1, INCLUDE_EMPTY))? {
                        Some(next) => next,
                        None => break,
                    };

                    if next == "</>" || next == "</" {
                        break;
                    }

                    let compiled = match next.as_str() {
                        "<" => compile_tag(tokens).map(Some),
                        "<>" => compile_fragment(tokens).map(Some),
                        "{" => compile_expression(tokens).map(Some),
                        _ => compile_text_node(tokens),
                    };

                    match end_of_input(compiled)? {
                        Some(Some(child)) => children.push(child),
                        Some(None) => {}
                        None => break,
                    }
                }
            }

            close_tag(tokens)?;
        }
    }

    children.retain(|child| !child.trim().is_empty());

    if !children.is_empty() {
        attributes.insert("children".to_string(), AttributeValue::Children(children));
    }

    Ok(generate_tag_php(&name, &attributes))
}

/// Compiles `<>children</>` into a newline join of the non-blank children.
fn compile_fragment(tokens: &mut Tokens) -> Result<String> {
    tokens.advance(INCLUDE_EMPTY)?;

    let mut children: Vec<String> = Vec::new();

    loop {
        match end_of_input(tokens.peek_next(1, SKIP_EMPTY))? {
            Some(next) if next == "</>" => {
                let _ = end_of_input(tokens.advance(SKIP_EMPTY))?;
                break;
            }
            Some(_) => {}
            None => break,
        }

        let next = tokens.peek_next(1, INCLUDE_EMPTY)?;

        let compiled = match next.as_str() {
            "<" => compile_tag(tokens).map(Some),
            "<>" => compile_fragment(tokens).map(Some),
            "{" => compile_expression(tokens).map(Some),
            _ => compile_text_node(tokens),
        };

        match end_of_input(compiled)? {
            Some(Some(child)) => children.push(child),
            Some(None) => {}
            None => break,
        }
    }

    children.retain(|child| !child.trim().is_empty());

    if children.is_empty() {
        return Ok("implode(\"\\n\", [])".to_string());
    }

    Ok(format!(
        "implode(\"\\n\", [\n{},\n])",
        strings::indent(&children.join(",\n"))
    ))
}

/// Compiles a `$`-led variable reference, optionally preceded by a static
/// qualifier, extending greedily through chained calls, index accesses,
/// brace blocks and object-access arrows. Plain `->` accesses are rewritten
/// to safe navigation (`?->`); the chain is otherwise copied unmodified.
fn compile_variable(tokens: &mut Tokens) -> Result<String> {
    let mut variable = String::new();

    if STATIC_VARIABLE_PREFIX.is_match(&tokens.peek_next(1, INCLUDE_EMPTY)?) {
        variable.push_str(&tokens.advance(INCLUDE_EMPTY)?);
    }

    variable.push_str(&tokens.advance(INCLUDE_EMPTY)?);

    if tokens.peek_next(1, INCLUDE_EMPTY)?.trim().is_empty() {
        return Err(CompileError::syntax("unexpected space after `$`"));
    }

    loop {
        let next = tokens.peek_next(1, INCLUDE_EMPTY)?;

        let chains = IDENTIFIER.is_match(&next)
            || matches!(next.as_str(), "(" | "{" | "[" | "->")
            || (next == "?" && tokens.peek_next(2, INCLUDE_EMPTY)? == "->");

        if !chains {
            break;
        }

        if next == "->" && tokens.current()? != "?" {
            variable.push('?');
        }

        match next.as_str() {
            "[" | "(" | "{" => variable.push_str(&compile_block(tokens)?),
            _ => variable.push_str(&tokens.advance(INCLUDE_EMPTY)?),
        }
    }

    Ok(variable)
}

/// One term: dispatches on the upcoming token to the tag, fragment, quoted
/// string, block or variable rule; any other token passes through unchanged.
fn compile_term(tokens: &mut Tokens) -> Result<String> {
    let next = tokens.peek_next(1, INCLUDE_EMPTY)?;

    match next.as_str() {
        "<>" => compile_fragment(tokens),
        "<" => compile_tag(tokens),
        "\"" | "'" => compile_quoted_string(tokens),
        "(" | "{" | "[" => compile_block(tokens),
        "$" => compile_variable(tokens),
        _ if STATIC_VARIABLE_PREFIX.is_match(&next) => compile_variable(tokens),
        _ => tokens.advance(INCLUDE_EMPTY),
    }
}

/// One statement: blank lines and comments pass through, an optional
/// `return` keyword and assignment target are preserved literally, and the
/// remaining terms go through the operator compiler. Indented statements are
/// re-indented by one unit.
fn compile_statement(tokens: &mut Tokens) -> Result<String> {
    if tokens.peek_next(1, INCLUDE_EMPTY)? == "\n" {
        return tokens.advance(INCLUDE_EMPTY);
    }

    let mut indentation = String::new();

    if is_inline_blank(&tokens.peek_next(1, INCLUDE_EMPTY)?) {
        while matches!(tokens.peek_next(1, INCLUDE_EMPTY), Ok(token) if is_blank(&token)) {
            indentation.push_str(&tokens.advance(INCLUDE_EMPTY)?);
        }

        if tokens.peek_next(1, INCLUDE_EMPTY)? == "\n" {
            return Ok(indentation);
        }
    }

    let has_indentation = !indentation.is_empty();
    let prefix = if has_indentation { "  " } else { "" };

    let next = tokens.peek_next(1, INCLUDE_EMPTY)?;

    if next == "//" {
        return Ok(format!("{prefix}{}", compile_until(tokens, "\n")?));
    }

    if next == "/*" {
        let comment = compile_until(tokens, "*/")?;

        return Ok(format!("{prefix}{comment}{}", tokens.advance(INCLUDE_EMPTY)?));
    }

    let mut result: Vec<String> = Vec::new();

    loop {
        let next = match end_of_input(tokens.peek_next(1, INCLUDE_EMPTY))? {
            Some(next) => next,
            None => break,
        };

        if next == ";" || next == "</>" || is_closing_bracket(&next) {
            break;
        }

        match end_of_input(compile_term(tokens))? {
            Some(term) => result.push(term),
            None => break,
        }

        match end_of_input(tokens.peek_next(1, SKIP_EMPTY))? {
            Some(ahead) if ahead == "</>" || is_closing_bracket(&ahead) => break,
            Some(_) => {}
            None => break,
        }
    }

    if matches!(tokens.peek_next(1, INCLUDE_EMPTY), Ok(token) if token == ";") {
        result.push(tokens.advance(INCLUDE_EMPTY)?);
    }

    let mut left = String::new();

    if result.first().is_some_and(|token| token == "return") {
        left = result.remove(0);
    }

    if let Some(index) = result.iter().position(|token| token == "=") {
        if index > 0 {
            left.push_str(&result[..=index].concat());
            result.drain(..=index);
        }
    }

    let compiled = operators::compile(&result)?;

    let statement = if left.is_empty() {
        compiled
    } else {
        format!("{left} {compiled}")
    };

    Ok(if has_indentation {
        strings::indent(&statement)
    } else {
        statement
    })
}

/// Compiles a statement sequence, optionally delimited by one bracket pair,
/// until the closing bracket, a fragment close, or the end of input. The
/// opening and closing delimiters are re-attached around the compiled
/// statements; trailing space-only statements are dropped.
fn compile_block_as_statements_list(tokens: &mut Tokens) -> Result<Vec<String>> {
    let mut start: Option<String> = None;
    let mut end: Option<&'static str> = None;

    if let Some(next) = end_of_input(tokens.peek_next(1, INCLUDE_EMPTY))? {
        if let Some(close) = closing_bracket(&next) {
            start = Some(tokens.advance(INCLUDE_EMPTY)?);
            end = Some(close);
        }
    }

    let mut statements: Vec<String> = Vec::new();
    let mut exhausted = false;

    loop {
        let next = match end_of_input(tokens.peek_next(1, INCLUDE_EMPTY))? {
            Some(next) => next,
            None => {
                exhausted = true;
                break;
            }
        };

        if end == Some(next.as_str()) || next == "</>" || is_closing_bracket(&next) {
            break;
        }

        match end_of_input(compile_statement(tokens))? {
            Some(statement) => statements.push(statement),
            None => {
                exhausted = true;
                break;
            }
        }
    }

    if !exhausted {
        tokens.advance(INCLUDE_EMPTY)?;
    }

    while statements
        .last()
        .is_some_and(|statement| statement.trim_matches(' ').is_empty())
    {
        statements.pop();
    }

    if let Some(start) = start {
        statements.insert(0, start);
    }

    if let Some(end) = end {
        statements.push(end.to_string());
    }

    Ok(statements)
}

/// Copies one balanced bracket-delimited run, recursively compiling the
/// statements between the delimiters.
fn compile_block(tokens: &mut Tokens) -> Result<String> {
    Ok(compile_block_as_statements_list(tokens)?.concat())
}

/// Compiles the contents of a `{...}` value: the block with its delimiters
/// stripped and the interior run through common-indentation removal.
fn compile_expression(tokens: &mut Tokens) -> Result<String> {
    let mut result = compile_block_as_statements_list(tokens)?;

    if !result.is_empty() {
        result.remove(0);
        result.pop();
    }

    Ok(strings::remove_common_indentation(&result.join("\n")))
}

/// Compiles one template into PHP source text: the fixed namespace preamble
/// followed by the transformed statements in original order. A template that
/// fails to compile produces no output at all.
pub fn transpile(template: &str) -> Result<String> {
    let mut tokens = Tokens::new(lexer::tokenize(template));

    let expressions = compile_block_as_statements_list(&mut tokens)?;

    Ok(format!(
        "<?php\n\nnamespace Phpx\\Jsx;\n\n{}",
        expressions.concat()
    ))
}
