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
fn reformats_a_file_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, "[1,2.50,\"a\\u0041\",true,null,[]]");

    cargo_bin_cmd!("cjson")
        .arg(&input)
        .assert()
        .success()
        .stdout("[1, 2.50, \"aA\", true, null, []]");
}

#[test]
fn reads_stdin_when_no_input_is_given() {
    cargo_bin_cmd!("cjson")
        .write_stdin("  {\"k\":\n -0}  ")
        .assert()
        .success()
        .stdout("{\"k\": 0}");
}

#[test]
fn dash_means_stdin() {
    cargo_bin_cmd!("cjson")
        .arg("-")
        .write_stdin("\"tab\\there\"")
        .assert()
        .success()
        .stdout("\"tab\\there\"");
}

#[test]
fn check_mode_prints_status_only() {
    cargo_bin_cmd!("cjson")
        .arg("--check")
        .write_stdin("{\"a\": [1, 2, 3]}")
        .assert()
        .success()
        .stdout("✔ valid\n");
}

#[test]
fn parse_errors_report_kind_and_offset() {
    cargo_bin_cmd!("cjson")
        .write_stdin("[1 2]")
        .assert()
        .failure()
        .code(1)
        .stderr(
            contains("ERROR  invalid object or array format").and(contains("at offset 4")),
        );
}

#[test]
fn trailing_input_is_rejected() {
    cargo_bin_cmd!("cjson")
        .arg("--check")
        .write_stdin("1 2")
        .assert()
        .failure()
        .stderr(contains("trailing characters"));
}

#[test]
fn max_depth_limits_nesting() {
    cargo_bin_cmd!("cjson")
        .args(["--max-depth", "2"])
        .write_stdin("[[1]]")
        .assert()
        .success()
        .stdout("[[1]]");

    cargo_bin_cmd!("cjson")
        .args(["--max-depth", "2"])
        .write_stdin("[[[1]]]")
        .assert()
        .failure()
        .stderr(contains("nesting depth limit exceeded").and(contains("at offset 3")));
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("nope.json");

    cargo_bin_cmd!("cjson")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("ERROR  i/o error").and(contains("nope.json")));
}

#[test]
fn writes_to_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("output.json");
    write_file(&input, "{\"name\":\"Ada\"}");

    cargo_bin_cmd!("cjson")
        .arg(&input)
        .args(["-o", output.to_str().expect("output path")])
        .assert()
        .success()
        .stdout(contains("Formatted").and(contains("output.json")).and(contains("→")));

    let contents = fs::read_to_string(&output).expect("read output");
    assert_eq!(contents, "{\"name\": \"Ada\"}");
}

#[test]
fn output_reparses_to_the_same_text() {
    let dir = TempDir::new().expect("tempdir");
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let text = (0..60)
        .map(|n| format!("\"key{n}\": [{n}, {{\"inner\": \"v{n}\"}}]"))
        .collect::<Vec<_>>()
        .join(",");

    cargo_bin_cmd!("cjson")
        .args(["-o", first.to_str().expect("first path")])
        .write_stdin(format!("{{{text}}}"))
        .assert()
        .success();
    cargo_bin_cmd!("cjson")
        .arg(&first)
        .args(["-o", second.to_str().expect("second path")])
        .assert()
        .success();

    let once = fs::read_to_string(&first).expect("read first");
    let twice = fs::read_to_string(&second).expect("read second");
    assert_eq!(once, twice);
}
