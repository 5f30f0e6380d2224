//! Walker Tests
//!
//! Each test works in its own directory under the system temp dir.

use phpx_cli::config::PhpxConfig;
use phpx_cli::logger::Logger;
use phpx_cli::walker::Walker;
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs, process, thread};

const PREAMBLE: &str = "<?php\n\nnamespace Phpx\\Jsx;\n\n";

fn temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("phpx-walker-{}-{name}", process::id()));

    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create temp dir");

    dir
}

fn walker() -> Walker {
    Walker::new(PhpxConfig::default(), Logger::new(false))
}

#[test]
fn compiles_templates_next_to_their_source() {
    let dir = temp_dir("compile");
    fs::write(dir.join("a.tag"), "<div></div>").expect("write template");

    let failures = walker().walk(&dir).expect("walk");

    assert_eq!(failures, 0);
    assert_eq!(
        fs::read_to_string(dir.join("a.php")).expect("read output"),
        format!("{PREAMBLE}Jsx::jsx('div', [])")
    );
}

#[test]
fn blank_templates_produce_empty_outputs() {
    let dir = temp_dir("blank");
    fs::write(dir.join("a.tag"), "  \n\n").expect("write template");

    let failures = walker().walk(&dir).expect("walk");

    assert_eq!(failures, 0);
    assert_eq!(
        fs::read_to_string(dir.join("a.php")).expect("read output"),
        ""
    );
}

#[test]
fn recurses_into_subdirectories() {
    let dir = temp_dir("recurse");
    let nested = dir.join("pages").join("admin");
    fs::create_dir_all(&nested).expect("create nested dirs");
    fs::write(nested.join("b.tag"), "<br/>").expect("write template");

    let failures = walker().walk(&dir).expect("walk");

    assert_eq!(failures, 0);
    assert!(nested.join("b.php").exists());
}

#[test]
fn ignores_files_with_other_extensions() {
    let dir = temp_dir("extensions");
    fs::write(dir.join("notes.txt"), "<div></div>").expect("write file");

    let failures = walker().walk(&dir).expect("walk");

    assert_eq!(failures, 0);
    assert!(!dir.join("notes.php").exists());
}

#[test]
fn up_to_date_outputs_are_not_rewritten() {
    let dir = temp_dir("up-to-date");
    fs::write(dir.join("a.tag"), "<div></div>").expect("write template");

    walker().walk(&dir).expect("first walk");

    // An output newer than its template must be left alone.
    thread::sleep(Duration::from_millis(50));
    fs::write(dir.join("a.php"), "tampered").expect("tamper output");

    let failures = walker().walk(&dir).expect("second walk");

    assert_eq!(failures, 0);
    assert_eq!(
        fs::read_to_string(dir.join("a.php")).expect("read output"),
        "tampered"
    );
}

#[test]
fn stale_outputs_are_recompiled() {
    let dir = temp_dir("stale");
    fs::write(dir.join("a.php"), "stale").expect("write stale output");

    thread::sleep(Duration::from_millis(50));
    fs::write(dir.join("a.tag"), "<div></div>").expect("write template");

    let failures = walker().walk(&dir).expect("walk");

    assert_eq!(failures, 0);
    assert_eq!(
        fs::read_to_string(dir.join("a.php")).expect("read output"),
        format!("{PREAMBLE}Jsx::jsx('div', [])")
    );
}

#[test]
fn failed_templates_are_counted_and_leave_no_output() {
    let dir = temp_dir("failures");
    fs::write(dir.join("bad.tag"), "<div 1bad>x</div>").expect("write template");
    fs::write(dir.join("good.tag"), "<br/>").expect("write template");

    let failures = walker().walk(&dir).expect("walk");

    assert_eq!(failures, 1);
    assert!(!dir.join("bad.php").exists());
    assert!(dir.join("good.php").exists());
}
