mod common;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

use common::{TestWorkspace, parse_table_row, people_csv};

fn inspect_cmd() -> Command {
    Command::cargo_bin("dataset-inspect").expect("binary exists")
}

#[test]
fn inspect_reports_column_types_and_counts() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write("people.csv", &people_csv());

    let assert = inspect_cmd()
        .args(["inspect", "-i", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("column")
                .and(contains("categorical"))
                .and(contains("numeric"))
                .and(contains("date")),
        );

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let age_line = stdout
        .lines()
        .find(|line| line.starts_with("age"))
        .expect("age row present");
    let cells = parse_table_row(age_line);
    assert_eq!(cells[0], "age");
    assert_eq!(cells[1], "numeric");
    assert_eq!(cells[2], "4", "three ages plus the missing value");
    assert_eq!(cells[3], "1");
    assert_eq!(cells[4], "29");
    assert_eq!(cells[5], "41");
}

#[test]
fn inspect_json_round_trips_row_and_column_counts() {
    let workspace = TestWorkspace::new();
    let mut contents = String::from("id,value\n");
    for i in 0..100 {
        contents.push_str(&format!("{i},{}\n", i % 7));
    }
    let csv_path = workspace.write("wide.csv", &contents);

    let assert = inspect_cmd()
        .args(["inspect", "-i", csv_path.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let parsed: Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["columns"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["data"].as_array().unwrap().len(), 100);
    assert_eq!(parsed["columns"][0]["type"], "numeric");
}

#[test]
fn inspect_writes_analysis_file() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write("people.csv", &people_csv());
    let out_path = workspace.path().join("analysis.json");

    inspect_cmd()
        .args([
            "inspect",
            "-i",
            csv_path.to_str().unwrap(),
            "-o",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&out_path).expect("analysis file");
    let parsed: Value = serde_json::from_str(&contents).expect("valid JSON");
    let age = &parsed["columns"][1];
    assert_eq!(age["name"], "age");
    assert_eq!(age["missing_values"], 1);
    // Non-numeric columns must not carry a numeric summary.
    assert!(parsed["columns"][0].get("min").is_none());
}

#[test]
fn inspect_rejects_header_only_file() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write("empty.csv", "a,b,c\n");

    inspect_cmd()
        .args(["inspect", "-i", csv_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Invalid or empty file"));
}

#[test]
fn inspect_rejects_duplicate_header_names() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write("dupe.csv", "id,name,id\n1,a,2\n");

    inspect_cmd()
        .args(["inspect", "-i", csv_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Duplicate column name 'id'"));
}

#[test]
fn inspect_resolves_tab_delimiter_from_extension() {
    let workspace = TestWorkspace::new();
    let tsv_path = workspace.write("data.tsv", "x\ty\n1\t2\n3\t4\n");

    let assert = inspect_cmd()
        .args(["inspect", "-i", tsv_path.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let x_line = stdout
        .lines()
        .find(|line| line.starts_with('x'))
        .expect("x row present");
    let cells = parse_table_row(x_line);
    assert_eq!(cells[1], "numeric");
}

#[test]
fn inspect_reads_stdin_with_dash() {
    inspect_cmd()
        .args(["inspect", "-i", "-"])
        .write_stdin(people_csv())
        .assert()
        .success()
        .stdout(contains("age").and(contains("numeric")));
}

#[test]
fn head_shows_requested_rows_only() {
    let workspace = TestWorkspace::new();
    let csv_path = workspace.write("people.csv", &people_csv());

    inspect_cmd()
        .args(["head", "-i", csv_path.to_str().unwrap(), "--rows", "2"])
        .assert()
        .success()
        .stdout(contains("alice").and(contains("bob")).and(contains("dan").not()));
}
