//! Process-boundary tests: the documented exit codes (§6) and the stdout
//! a script produces, driven through the real `zen` binary.

use assert_cmd::Command;
use predicates::str::contains;

fn zen() -> Command {
    Command::cargo_bin("zen").expect("zen binary built")
}

fn script(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn running_a_valid_script_exits_zero_and_prints_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "ok.zen", "set x 42\nprint x");

    zen().arg(&path).assert().success().stdout(contains("42"));
}

#[test]
fn missing_file_exits_three() {
    zen().arg("/nonexistent/path/does/not/exist.zen").assert().code(3);
}

#[test]
fn syntax_error_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "bad.zen", "set 1 2 3 ===");

    zen().arg(&path).assert().code(2);
}

#[test]
fn top_level_error_value_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "divzero.zen", "set a 10\nset b 0\nprint a / b");

    zen().arg(&path).assert().code(1).stderr(contains("Division by zero"));
}

#[test]
fn debug_ast_flag_dumps_the_ast_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "trivial.zen", "print 1");

    zen().arg("--debug-ast").arg(&path).assert().success().stderr(contains("Program"));
}
