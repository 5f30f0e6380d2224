//! String utilities used by the code generator.

/// Wraps `string` in double quotes, backslash-escaping any internal double
/// quote, yielding a PHP string literal.
pub fn escape(string: &str) -> String {
    format!("\"{}\"", string.replace('"', "\\\""))
}

/// Indents every line of `code` by one unit (two spaces).
pub fn indent(code: &str) -> String {
    code.split('\n')
        .map(|row| format!("  {row}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips the indentation shared by all lines.
///
/// Leading and trailing fully-blank lines are dropped and tabs normalized to
/// four spaces first. One leading space is then removed per line and the
/// procedure recurses until some non-blank line no longer starts with a
/// space; a line without leading space blocks any stripping at that level
/// and the pre-strip lines are returned joined by newline.
pub fn remove_common_indentation(rows: &str) -> String {
    let mut rows: Vec<String> = rows.split('\n').map(str::to_string).collect();

    while rows.first().is_some_and(|row| row.trim().is_empty()) {
        rows.remove(0);
    }

    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }

    let rows: Vec<String> = rows
        .into_iter()
        .map(|row| row.replace('\t', "    "))
        .collect();

    if rows.is_empty() {
        return "\n".to_string();
    }

    if let [row] = rows.as_slice() {
        return row.clone();
    }

    let mut result = Vec::new();

    for row in &rows {
        if row.is_empty() {
            result.push(String::new());
            continue;
        }

        match row.strip_prefix(' ') {
            Some(stripped) => result.push(stripped.to_string()),
            None => break,
        }
    }

    if result.len() != rows.len() {
        return rows.join("\n");
    }

    remove_common_indentation(&result.join("\n"))
}
