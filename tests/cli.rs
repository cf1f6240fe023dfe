//! End-to-end tests for the mdconv binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mdconv() -> Command {
    Command::cargo_bin("mdconv").unwrap()
}

fn fixture(source: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("input.md"), source).unwrap();
    dir
}

#[test]
fn converts_to_stdout() {
    let dir = fixture("Hello _world_\n\n<b>bold</b>\n");
    mdconv()
        .current_dir(dir.path())
        .arg("input.md")
        .assert()
        .success()
        .stdout("<p>Hello <em>world</em></p><p><b>bold</b></p>\n");
}

#[test]
fn flags_change_rendering() {
    let dir = fixture("Hello _world_\n\n<b>bold</b>\n");
    mdconv()
        .current_dir(dir.path())
        .args(["--noemphasizedtext", "input.md", "--nowraphtmlinparagraph"])
        .assert()
        .success()
        .stdout("<p>Hello _world_</p><b>bold</b>\n");
}

#[test]
fn writes_output_file() {
    let dir = fixture("text");
    mdconv()
        .current_dir(dir.path())
        .args(["--output=out.html", "input.md"])
        .assert()
        .success()
        .stdout("");
    let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert_eq!(html, "<p>text</p>");
}

#[test]
fn no_arguments_prints_usage() {
    mdconv()
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Usage mdconv [FILE] [OPTIONS...]"))
        .stdout(predicate::str::contains("--output=<file>"))
        .stderr(predicate::str::contains("No input file specified"));
}

#[test]
fn unknown_option_prints_usage() {
    let dir = fixture("text");
    mdconv()
        .current_dir(dir.path())
        .args(["input.md", "--bogus"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Usage mdconv"))
        .stderr(predicate::str::contains("Unknown option '--bogus'"));
}

#[test]
fn output_without_value_prints_usage() {
    let dir = fixture("text");
    mdconv()
        .current_dir(dir.path())
        .args(["input.md", "--output"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Usage mdconv"))
        .stderr(predicate::str::contains("'--output' option requires a value"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn help_succeeds() {
    mdconv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--noemphasizedtext"));
}

#[test]
fn missing_input_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    mdconv()
        .current_dir(dir.path())
        .arg("nope.md")
        .assert()
        .failure()
        .stdout(predicate::str::contains("File doesnt exist:"))
        .stdout(predicate::str::contains("nope.md"));
}

#[test]
fn unwritable_output_is_reported() {
    let dir = fixture("text");
    mdconv()
        .current_dir(dir.path())
        .args(["input.md", "--output=missing_dir/out.html"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error writing file:"));
}
