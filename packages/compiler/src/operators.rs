//! Logical-operator compiler
//!
//! PHP's native `&&`/`||` coerce their result to a boolean, but templates
//! need JavaScript-style value-preserving short circuiting: `a && b` must
//! yield `a` itself when `a` is falsy, and `a || b` must yield `a` itself
//! when it is truthy. This module rewrites the flat token run of one value
//! expression into correctly grouped ternary/nullish text, wrapping `&&` and
//! `||` runs in `Jsx::jsAnd`/`Jsx::jsOr` calls over zero-argument closures
//! that evaluate left to right and stop at the first falsy (resp. truthy)
//! operand.

use crate::error::{CompileError, Result};

/// Tokens that bound operand groups at the top level of an expression run.
const GROUP_OPERATORS: &[&str] = &["?", ":", "??", "||", "&&", ";"];

/// Segments a flat token run into operand groups and singleton operator
/// groups. Operand tokens between operators are concatenated and trimmed;
/// a run opening with an operator yields a leading empty group, which
/// `compile` rejects as a missing left operand.
fn prepare(tokens: &[String]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    let mut operand: Vec<&str> = Vec::new();
    let mut open = true;

    for token in tokens {
        if GROUP_OPERATORS.contains(&token.as_str()) {
            if open {
                groups.push(operand.concat().trim().to_string());
                operand.clear();
            }

            groups.push(token.clone());
            open = false;
        } else {
            open = true;
            operand.push(token);
        }
    }

    if open {
        groups.push(operand.concat().trim().to_string());
    }

    groups
}

fn compile_logical_and_groups(groups: &[String]) -> String {
    if groups.len() == 1 {
        groups[0].clone()
    } else {
        format!("Jsx::jsAnd(fn() => {})", groups.join(", fn() => "))
    }
}

fn compile_logical_or_groups(groups: &[Vec<String>]) -> String {
    if groups.len() == 1 {
        compile_logical_and_groups(&groups[0])
    } else {
        let ands: Vec<String> = groups
            .iter()
            .map(|ands| compile_logical_and_groups(ands))
            .collect();

        format!("Jsx::jsOr(fn() => {})", ands.join(", fn() => "))
    }
}

/// Splits on top-level `||` into OR-groups, each holding its `&&` operands,
/// and combines them lazily. A single operand is emitted verbatim.
fn compile_ors(conditions: &[String]) -> String {
    let mut groups: Vec<Vec<String>> = vec![Vec::new()];

    for condition in conditions {
        if condition == "||" {
            groups.push(Vec::new());
        } else if condition != "&&" {
            groups
                .last_mut()
                .expect("at least one OR-group")
                .push(condition.clone());
        }
    }

    compile_logical_or_groups(&groups)
}

/// Splits on top-level `??` and joins both sides with PHP's native nullish
/// coalescing operator, which already preserves operand values.
fn compile_nullish(conditions: &[String]) -> Result<String> {
    match conditions.iter().position(|condition| condition == "??") {
        Some(0) => Err(CompileError::syntax(
            "unexpected `??` at the beginning of expression",
        )),
        Some(index) => Ok(format!(
            "{} ?? {}",
            compile_ors(&conditions[..index]),
            compile_nullish(&conditions[index + 1..])?
        )),
        None => Ok(compile_ors(conditions)),
    }
}

/// Compiles the token run of one value expression, optionally ending in a
/// `;` terminator which is detached and reattached unchanged.
///
/// Ternaries are resolved first: the condition and then-branch each go
/// through nullish/OR/AND resolution, while the else-branch recurses into
/// the full compilation so `a ? b : c ? d : e` chains right-associatively.
/// When the whole run carries more than one `:`, the else-branch is
/// parenthesized to keep the grouping unambiguous.
pub fn compile(tokens: &[String]) -> Result<String> {
    let mut conditions = prepare(tokens);

    let mut end = String::new();

    if conditions.last().is_some_and(|last| last == ";") {
        end = conditions.pop().expect("checked last");
    }

    // Checked after detaching the terminator, so a bare `;` run stays a
    // valid empty statement while `;` followed by anything does not.
    if conditions.len() > 1 && conditions[0].is_empty() {
        return Err(CompileError::syntax(
            "expression must not start with `?`, `:`, `??`, `||`, `&&` or `;`",
        ));
    }

    let questionmark_index = conditions.iter().position(|condition| condition == "?");
    let colon_index = conditions.iter().position(|condition| condition == ":");

    if let Some(questionmark_index) = questionmark_index {
        if questionmark_index == 0 {
            return Err(CompileError::syntax(
                "unexpected `?` at the beginning of the condition",
            ));
        }

        let colon_index = match colon_index {
            None => {
                return Err(CompileError::syntax("missing `:` in the ternary operator"));
            }
            Some(colon_index) if colon_index < questionmark_index => {
                return Err(CompileError::syntax(
                    "unexpected `:` that came sooner than `?` in the condition",
                ));
            }
            Some(colon_index) => colon_index,
        };

        let condition = compile_nullish(&conditions[..questionmark_index])?;
        let then = compile_nullish(&conditions[questionmark_index + 1..colon_index])?;
        let otherwise = compile(&conditions[colon_index + 1..])?;

        let questionmarks = conditions.iter().filter(|c| *c == "?").count();
        let colons = conditions.iter().filter(|c| *c == ":").count();

        if questionmarks != colons {
            return Err(CompileError::syntax(
                "uneven counts of `?` and `:` in ternary operators",
            ));
        }

        return Ok(if colons > 1 {
            format!("{condition} ? {then} : ({otherwise}){end}")
        } else {
            format!("{condition} ? {then} : {otherwise}{end}")
        });
    }

    Ok(format!("{}{end}", compile_nullish(&conditions)?))
}
