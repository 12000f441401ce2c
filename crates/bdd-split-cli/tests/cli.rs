//! Smoke tests for the `bdd-split` binary.
#![expect(clippy::expect_used, reason = "integration tests fail loudly")]

use std::path::{Path, PathBuf};
use std::str;

use assert_cmd::Command;
use rstest::rstest;

const ENV_VARS: [&str; 3] = ["BDD_SPLIT_TAGS", "BDD_SPLIT_OUTPUT_DIR", "BDD_SPLIT_LOG_LEVEL"];

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn bdd_split() -> Command {
    let mut cmd = Command::cargo_bin("bdd-split").expect("binary exists");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn feature_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("output directory exists")
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    files.sort();
    files
}

#[test]
fn splits_report_into_output_directory() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let out = tmp.path().join("out");
    let output = bdd_split()
        .arg("--output")
        .arg(&out)
        .arg(fixture("search.json"))
        .output()
        .expect("runs");
    assert!(output.status.success());

    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert!(stdout.contains("4 emitted, 1 filtered, 1 skipped"));
    assert!(stdout.contains("total: 4 files written to"));

    let files = feature_files(&out.join("features/shop"));
    assert_eq!(files.len(), 4);
    let cheese = files
        .iter()
        .find(|path| path.to_string_lossy().contains("search-for-Cheese-"))
        .expect("Cheese scenario written");
    let text = std::fs::read_to_string(cheese).expect("readable");
    assert!(text.starts_with("Feature: Search: Search for Cheese\n"));
}

#[test]
fn repeated_tags_replace_the_defaults() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let out = tmp.path().join("out");
    let output = bdd_split()
        .args(["--tag", "@search", "--tag", "@not-regression", "--output"])
        .arg(&out)
        .arg(fixture("search.json"))
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(feature_files(&out.join("features/shop")).len(), 2);
}

#[test]
fn tags_can_come_from_the_environment() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let out = tmp.path().join("out");
    let output = bdd_split()
        .env("BDD_SPLIT_TAGS", "@search")
        .env("BDD_SPLIT_OUTPUT_DIR", &out)
        .arg(fixture("search.json"))
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert_eq!(feature_files(&out.join("features/shop")).len(), 1);
}

#[test]
fn stale_output_is_removed() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let out = tmp.path().join("out");
    std::fs::create_dir_all(&out).expect("create out");
    std::fs::write(out.join("stale.feature"), "Feature: old\n").expect("stale file");
    bdd_split()
        .arg("--output")
        .arg(&out)
        .arg(fixture("search.json"))
        .assert()
        .success();
    assert!(!out.join("stale.feature").exists());
}

#[rstest]
#[case::missing_sigil(&["--tag", "smoke"])]
#[case::blank_tag(&["--tag", "@"])]
fn invalid_configuration_exits_with_two(#[case] flags: &[&str]) {
    let tmp = tempfile::tempdir().expect("temp dir");
    bdd_split()
        .args(flags)
        .arg("--output")
        .arg(tmp.path().join("out"))
        .arg(fixture("search.json"))
        .assert()
        .code(2);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn invalid_environment_exits_with_two() {
    let tmp = tempfile::tempdir().expect("temp dir");
    bdd_split()
        .env("BDD_SPLIT_LOG_LEVEL", "chatty")
        .arg("--output")
        .arg(tmp.path().join("out"))
        .arg(fixture("search.json"))
        .assert()
        .code(2);
}

#[test]
fn blank_second_report_leaves_output_untouched() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let out = tmp.path().join("out");
    let blank = tmp.path().join("blank.json");
    std::fs::write(&blank, "\n").expect("blank report");
    let output = bdd_split()
        .arg("--output")
        .arg(&out)
        .arg(fixture("search.json"))
        .arg(&blank)
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!out.exists(), "no output directory is created for a failed run");
}

#[test]
fn missing_report_exits_with_one() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let output = bdd_split()
        .arg("--output")
        .arg(tmp.path().join("out"))
        .arg(tmp.path().join("missing.json"))
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("failed to read report"));
}
