use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MESSAGE: &str = "Memory: 20.8G (min: 250M peak: 27G swap: 2.7G swap peak: 6.7G)";

fn msgp() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("msgp"));
    cmd.env_remove("MSGP_SCORE")
        .env_remove("MSGP_JOBS")
        .env_remove("MSGP_LOG");
    cmd
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn write_format_sources(root: &Path) {
    write_file(
        &root.join("test.c"),
        "#include <stdio.h>\nint main() {\n    printf(\"min: %s swap peak: %d\", \"value\", 100);\n    return 0;\n}\n",
    );
    write_file(
        &root.join("test.py"),
        "def main():\n    print(\"min: %s swap peak: %f\" % (\"value\", 100.0))\n",
    );
    write_file(
        &root.join("test.js"),
        "function main() {\n    console.log(\"min: %s swap peak: %d\", \"value\", 100);\n}\n",
    );
}

// ============== format specifier tests ==============

#[test]
fn format_specifiers_match_in_every_language() {
    let temp = tempdir().unwrap();
    write_format_sources(temp.path());

    msgp()
        .args(["--nocolor", "--score", "1", MESSAGE])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("printf("))
        .stdout(predicate::str::contains("print("))
        .stdout(predicate::str::contains("console.log"))
        .stdout(predicate::str::contains(" <== match"));
}

#[test]
fn threshold_from_environment() {
    let temp = tempdir().unwrap();
    write_format_sources(temp.path());

    msgp()
        .env("MSGP_SCORE", "1000")
        .args(["--nocolor", MESSAGE])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn zero_score_literals_listed_by_default() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.py"), "x = 'unrelated'\n");

    let assert = msgp()
        .args(["--format", "jsonl", "Memory: 16G"])
        .arg(temp.path())
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "unrelated");
    assert_eq!(items[0]["score"], 0.0);
}

#[test]
fn unknown_extensions_are_skipped() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("notes.txt"), "\"min: swap peak:\"\n");
    write_file(&temp.path().join("main.rs"), "println!(\"min: swap peak:\");\n");

    msgp()
        .args(["--nocolor", MESSAGE])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_directory_is_an_error() {
    let temp = tempdir().unwrap();

    msgp()
        .arg(MESSAGE)
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("msgp: argument error: directory not found"));
}

#[test]
fn missing_arguments_fail() {
    msgp().arg(MESSAGE).assert().failure();
}

// ============== output tests ==============

#[test]
fn summary_line_and_line_numbers() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("app.py"),
        "import os\n\nprint(\"disk full: %d bytes left\" % n)\n",
    );

    let assert = msgp()
        .args(["--nocolor", "-n", "disk full: 12 bytes left"])
        .arg(temp.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let lines: Vec<_> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("File: "));
    assert!(lines[0].ends_with("app.py  Line: 3  Type: string  Score: 17.3"));
    assert_eq!(lines[1], "3:print(\"disk full: %d bytes left\" % n) <== match");
}

#[test]
fn with_filename_drops_summary() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("app.js"), "alert('disk full');\n");

    let assert = msgp()
        .args(["--nocolor", "-H", "disk full"])
        .arg(temp.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    assert!(!stdout.contains("File: "));
    assert!(stdout.trim_end().ends_with("app.js:alert('disk full'); <== match"));
}

#[test]
fn context_prints_separator() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("a.c"),
        "int a;\nint b;\nvoid f() { puts(\"disk full\"); }\nint c;\nint d;\n",
    );

    let assert = msgp()
        .args(["--nocolor", "-C", "1", "disk full"])
        .arg(temp.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let lines: Vec<_> = stdout.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "int b;");
    assert_eq!(lines[2], "void f() { puts(\"disk full\"); } <== match");
    assert_eq!(lines[3], "int c;");
    assert_eq!(lines[4], "-".repeat(40));
}

#[test]
fn color_highlights_matched_text() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.c"), "puts(\"disk full\");\n");

    msgp()
        .args(["--color", "disk full"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[31m"));
}

#[test]
fn nocolor_output_has_no_escapes() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.c"), "puts(\"disk full\");\n");

    msgp()
        .args(["--nocolor", "disk full"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn color_flags_are_exclusive() {
    let temp = tempdir().unwrap();
    msgp()
        .args(["--color", "--nocolor", "x"])
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn jsonl_hits_sorted_by_score() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("a.py"),
        "x = 'peak'\ny = 'min: %s swap peak: %d'\nz = 'swap'\n",
    );

    let assert = msgp()
        .args(["--format", "jsonl", "--sort", MESSAGE])
        .arg(temp.path())
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    let lines: Vec<_> = items.iter().map(|i| i["line"].as_u64().unwrap()).collect();
    assert_eq!(lines, vec![2, 1, 3]);
    assert_eq!(items[0]["text"], "min: %s swap peak: %d");
    assert_eq!(items[0]["cleaned"], "min:  swap peak: ");
}

#[test]
fn json_output_is_an_array() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), "f(\"disk full\");\n");

    let assert = msgp()
        .args(["--format", "json", "-j", "1", "disk full"])
        .arg(temp.path())
        .assert()
        .success();
    let parsed: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let hits = parsed.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["line"], 1);
    assert_eq!(hits[0]["spans"][0]["start"], 0);
}

#[test]
fn multiline_literal_reports_opening_line() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("doc.py"),
        "import os\n\nUSAGE = \"\"\"usage: tool\n  --verbose  talk more\n\"\"\"\n",
    );

    let assert = msgp()
        .args(["--format", "jsonl", "--score", "5", "usage: tool"])
        .arg(temp.path())
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["line"], 3);
    assert_eq!(items[0]["text"].as_str().unwrap().matches('\n').count(), 2);
}

#[test]
fn debug_logs_go_to_stderr() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.c"), "puts(\"disk full\");\n");

    msgp()
        .args(["--format", "jsonl", "--debug", "disk full"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("search finished"))
        .stdout(predicate::str::contains("search finished").not());
}
