//! End-to-end CLI tests for the `shon` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn shon() -> Command {
    Command::cargo_bin("shon").unwrap()
}

#[test]
fn fmt_reads_stdin_and_writes_stdout() {
    shon()
        .arg("fmt")
        .write_stdin("@a{x:1,y:[1,2]}")
        .assert()
        .success()
        .stdout(predicate::str::contains("@a {\n    x: 1,\n    y: [1, 2]\n}"));
}

#[test]
fn fmt_minify_collapses_to_one_line() {
    shon()
        .args(["fmt", "--minify"])
        .write_stdin("@a {\n    // gone\n    x: 1,\n}\n")
        .assert()
        .success()
        .stdout("@a{x:1}");
}

#[test]
fn fmt_reports_parse_errors_on_stderr_with_nonzero_exit() {
    shon()
        .arg("fmt")
        .write_stdin("@a { id: 1, id: 2 }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key 'id'"));
}

#[test]
fn to_json_converts_typed_literals_to_strings() {
    shon()
        .arg("to-json")
        .write_stdin(r#"@data { total: $decimal("1042.75"), qty: 3 }"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": \"1042.75\""))
        .stdout(predicate::str::contains("\"qty\": 3"));
}

#[test]
fn from_json_tags_decimals_and_timestamps() {
    shon()
        .args(["from-json", "--ns", "ledger"])
        .write_stdin(r#"{"balance": "19.99", "at": "2025-03-22T14:45:00Z"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("@ledger {"))
        .stdout(predicate::str::contains("balance: $decimal(\"19.99\")"))
        .stdout(predicate::str::contains(
            "at: $timestamp(\"2025-03-22T14:45:00Z\")",
        ));
}

#[test]
fn from_csv_extracts_dictionaries() {
    shon()
        .args(["from-csv", "--ns", "people"])
        .write_stdin("name,title\nSean,Engineer\nDarcy,Engineer\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("&title.title_1"))
        .stdout(predicate::str::contains("@title {"));
}

#[test]
fn from_json_writes_output_and_schema_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("people.shon");
    std::fs::write(&input, r#"{"name": "Sean"}"#).unwrap();

    shon()
        .args(["from-json"])
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let shon_text = std::fs::read_to_string(&output).unwrap();
    assert!(shon_text.contains("$schema: \"people.shos\""));
    assert!(shon_text.contains("name: \"Sean\""));
    assert!(dir.path().join("people.shos").exists());
}

#[test]
fn failed_conversion_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.shon");
    let output = dir.path().join("out.json");
    std::fs::write(&input, "@broken {").unwrap();
    std::fs::write(&output, "previous contents").unwrap();

    shon()
        .args(["to-json"])
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "previous contents"
    );
}

#[test]
fn fmt_round_trips_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.shon");
    let output = dir.path().join("out.shon");
    std::fs::write(&input, "@cfg { b: 2, a: 1 }").unwrap();

    shon()
        .args(["fmt", "--sort", "-n", "2"])
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text, "@cfg {\n  a: 1,\n  b: 2\n}\n");
}

#[test]
fn verbose_flag_traces_stages() {
    shon()
        .args(["fmt", "--verbose"])
        .write_stdin("@a { x: 1 }")
        .assert()
        .success()
        .stderr(predicate::str::contains("reformatting"));
}
