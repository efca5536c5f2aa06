use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn compiles_file_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("config.json");
    write_file(&input, r#"{"name":"Ada","age":37}"#);

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .assert()
        .success()
        .stdout(
            contains("// @generated by json2rs. Do not edit.")
                .and(contains("pub mod config {"))
                .and(contains("text: \"nameAdaage\","))
                .and(contains("pub fn root() -> Value<'static> {")),
        );
}

#[test]
fn reads_stdin_with_default_name() {
    cargo_bin_cmd!("json2rs")
        .write_stdin("[1, 2, 3]")
        .assert()
        .success()
        .stdout(contains("pub mod document {").and(contains("root: ValueRef::array(0),")));
}

#[test]
fn name_option_overrides_stem() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.json");
    write_file(&input, "null");

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .args(["--name", "settings"])
        .assert()
        .success()
        .stdout(contains("pub mod settings {").and(contains("root: ValueRef::NULL,")));
}

#[test]
fn stem_is_sanitized_into_a_module_name() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("My-Data.v2.json");
    write_file(&input, "true");

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("pub mod my_data_v2 {"));
}

#[test]
fn large_mode_hoists_arenas() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("big.json");
    write_file(&input, r#"{"values":[1,2,3]}"#);

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .arg("--large")
        .assert()
        .success()
        .stdout(contains("static INTS: [i64; 3] = [").and(contains("ints: &INTS,")));
}

#[test]
fn crate_path_option_changes_import() {
    cargo_bin_cmd!("json2rs")
        .args(["--crate-path", "crate::runtime"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(contains(
            "use crate::runtime::{Document, Member, Span, Value, ValueRef};",
        ));
}

#[test]
fn writes_output_file_and_reports() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("out.rs");
    write_file(&input, r#"{"items":[1,2]}"#);

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("✔ Compiled").and(contains("→")));

    let generated = fs::read_to_string(&output).expect("read output");
    assert!(generated.contains("pub mod input {"));
    assert!(generated.contains("ValueRef::int(1),"));
}

#[test]
fn stats_are_reported_next_to_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("out.rs");
    write_file(&input, r#"{"a":"x","b":"x"}"#);

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--stats")
        .assert()
        .success()
        .stdout(contains("ℹ strings  3").and(contains("ℹ members  2")));
}

#[test]
fn stats_go_to_stderr_when_source_is_on_stdout() {
    cargo_bin_cmd!("json2rs")
        .arg("--stats")
        .arg("--no-dedupe")
        .write_stdin(r#"{"a":"x","b":"x"}"#)
        .assert()
        .success()
        .stdout(contains("pub mod document {").and(contains("ℹ").not()))
        .stderr(contains("ℹ strings  4"));
}

#[test]
fn parse_error_fails_without_writing() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("broken.json");
    let output = dir.path().join("out.rs");
    write_file(&input, "{\n  \"a\": [1, 2\n");

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(contains("ERROR  parse error").and(contains("line")));

    assert!(!output.exists());
}

#[test]
fn invalid_name_fails() {
    cargo_bin_cmd!("json2rs")
        .args(["--name", "fn"])
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(contains("ERROR  invalid name \"fn\""));
}

#[test]
fn arena_limit_overflow_fails() {
    cargo_bin_cmd!("json2rs")
        .args(["--arena-limit", "2"])
        .write_stdin("[1,2,3]")
        .assert()
        .failure()
        .stderr(contains("ERROR  emission overflow: ints arena holds 3 entries, limit is 2"));
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("missing.json");

    cargo_bin_cmd!("json2rs")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("ERROR  failed to read"));
}
