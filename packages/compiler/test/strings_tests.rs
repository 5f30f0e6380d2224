//! String Utility Tests

use phpx_compiler::strings;

#[test]
fn escape_wraps_in_double_quotes() {
    assert_eq!(strings::escape("hello"), "\"hello\"");
    assert_eq!(strings::escape(""), "\"\"");
}

#[test]
fn escape_escapes_internal_double_quotes() {
    assert_eq!(strings::escape("a \"b\" c"), "\"a \\\"b\\\" c\"");
}

#[test]
fn indent_prefixes_every_line() {
    assert_eq!(strings::indent("a"), "  a");
    assert_eq!(strings::indent("a\nb"), "  a\n  b");
    assert_eq!(strings::indent(""), "  ");
}

#[test]
fn common_indentation_is_removed_completely() {
    assert_eq!(strings::remove_common_indentation("  a\n  b"), "a\nb");
    assert_eq!(
        strings::remove_common_indentation("    a\n      b\n    c"),
        "a\n  b\nc"
    );
}

#[test]
fn a_flush_line_blocks_stripping() {
    assert_eq!(strings::remove_common_indentation("  a\nb"), "  a\nb");
    assert_eq!(strings::remove_common_indentation("a\n  b"), "a\n  b");
}

#[test]
fn edge_blank_lines_are_dropped() {
    assert_eq!(strings::remove_common_indentation("\n  a\n  b\n"), "a\nb");
    // A single surviving line keeps its indentation.
    assert_eq!(strings::remove_common_indentation("\n\n  a\n\n"), "  a");
}

#[test]
fn interior_blank_lines_do_not_block_stripping() {
    assert_eq!(
        strings::remove_common_indentation("  a\n\n  b"),
        "a\n\nb"
    );
}

#[test]
fn tabs_normalize_to_four_spaces() {
    assert_eq!(strings::remove_common_indentation("\ta"), "    a");
    assert_eq!(strings::remove_common_indentation("\ta\n\tb"), "a\nb");
}

#[test]
fn single_lines_keep_their_indentation() {
    assert_eq!(strings::remove_common_indentation("  a"), "  a");
}

#[test]
fn blank_input_collapses_to_a_newline() {
    assert_eq!(strings::remove_common_indentation(""), "\n");
    assert_eq!(strings::remove_common_indentation("   \n  "), "\n");
}
