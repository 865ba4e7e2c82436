//! End-to-end tests driving the `mini` binary through `assert_cmd`, the
//! way `faxt`'s own `tests/` directory drives its binary — each case
//! writes a `.mini` source file to a tempdir and checks the process's
//! exit status and output.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn mini_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile creation failed");
    write!(file, "{source}").unwrap();
    file
}

#[test]
fn arithmetic_precedence() {
    let file = mini_file("print(1 + 2 * 3)");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));
}

#[test]
fn function_definition_and_call() {
    let file = mini_file("f(x) = x * x; print(f(5))");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("25"));
}

#[test]
fn closures_capture_their_environment() {
    let file = mini_file("make_adder(n) = { adder(x) = x + n; adder }; add5 = make_adder(5); print(add5(10))");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));
}

#[test]
fn list_and_map_indexing() {
    let file = mini_file("xs = [10, 20, 30]; m = {a: 1, b: 2}; print(xs[1]); print(m.b)");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("20"))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn if_else_branches() {
    let file = mini_file("x = 4; print(if (x > 2) { \"big\" } else { \"small\" })");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("big"));
}

#[test]
fn range_produces_a_list() {
    let file = mini_file("print(len(1..5))");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("4"));
}

#[test]
fn compound_plus_assign() {
    let file = mini_file("x = 1; x += 2; print(x)");
    Command::cargo_bin("mini")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn undefined_name_is_a_nonzero_exit() {
    let file = mini_file("print(undefined_name)");
    Command::cargo_bin("mini").unwrap().arg(file.path()).assert().failure().stderr(predicate::str::contains("error"));
}

#[test]
fn wrong_arity_call_is_a_nonzero_exit() {
    let file = mini_file("f(a, b) = a + b; f(1)");
    Command::cargo_bin("mini").unwrap().arg(file.path()).assert().failure();
}

#[test]
fn missing_file_and_missing_repl_flag_is_a_usage_error() {
    Command::cargo_bin("mini")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repl"));
}

#[test]
fn nonexistent_file_is_an_io_error() {
    Command::cargo_bin("mini")
        .unwrap()
        .arg("/no/such/file.mini")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}
