//! End-to-end CLI tests: write a temp script, run the built binary,
//! assert on stdout/stderr/exit code (§10.5).

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp script");
    file.write_all(source.as_bytes()).expect("failed to write temp script");
    file
}

#[test]
fn help_flag_prints_usage_and_exits_zero() {
    Command::cargo_bin("rill")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_exits_zero() {
    Command::cargo_bin("rill")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rill"));
}

#[test]
fn missing_source_file_exits_one() {
    Command::cargo_bin("rill")
        .unwrap()
        .arg("/nonexistent/path/to/script.rill")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn successful_evaluation_prints_inspect_of_final_value() {
    let file = script("let a = 5; a + 10;");
    Command::cargo_bin("rill")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("15\n"));
}

#[test]
fn null_final_value_prints_nothing() {
    let file = script("let a = 5;");
    Command::cargo_bin("rill")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq(""));
}

#[test]
fn parse_errors_are_reported_and_exit_one() {
    let file = script("let = ;");
    Command::cargo_bin("rill")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parser error:"));
}

#[test]
fn print_builtin_writes_to_stdout() {
    let file = script(r#"print("hi");"#);
    Command::cargo_bin("rill")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("hi\n"));
}

#[test]
fn dump_tokens_writes_token_stream_to_stderr() {
    let file = script("let a = 5;");
    Command::cargo_bin("rill")
        .unwrap()
        .arg("--dump-tokens")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Eof"));
}

#[test]
fn dump_ast_writes_program_to_stderr() {
    let file = script("let a = 5;");
    Command::cargo_bin("rill")
        .unwrap()
        .arg("--dump-ast")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Program"));
}

#[test]
fn runtime_error_value_is_printed_via_inspect() {
    let file = script("5 + true;");
    Command::cargo_bin("rill")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("type mismatch: INTEGER + BOOLEAN"));
}
