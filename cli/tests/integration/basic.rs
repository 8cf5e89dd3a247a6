//! Basic functionality integration tests for tcopy CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, snapshot};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_basic_file_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "hello world").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(src.path().join("test.txt"))
        .arg(dst.path().join("test.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 files (11 B)"));

    assert_eq!(
        fs::read_to_string(dst.path().join("test.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_recursive_directory_copy() {
    let fixture = TestFixture::new();
    fixture.create_nested_structure(3, 2);
    fixture.create_files(5, 100);
    let dest = fixture.dst.path().join("copied");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(fixture.src.path()).arg(&dest).assert().success();

    assert_eq!(snapshot(fixture.src.path()), snapshot(&dest));
    fixture.assert_file_content(
        &dest.join("level0/level1/level2/file1.txt"),
        "content at level 2",
    );
}

#[test]
fn test_jobs_flag() {
    let fixture = TestFixture::new();
    fixture.create_files(50, 10);
    let dest = fixture.dst.path().join("copied");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg("-j")
        .arg("3")
        .arg(fixture.src.path())
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 50 files"));

    assert_eq!(snapshot(fixture.src.path()), snapshot(&dest));
}

#[test]
fn test_existing_destination_is_overwritten() {
    let fixture = TestFixture::new();
    fs::write(fixture.src.path().join("a.txt"), "new").unwrap();
    fs::write(fixture.dst.path().join("a.txt"), "an older, longer version").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.dst.path().join("a.txt"), "new");
}

#[test]
fn test_copy_into_parent() {
    let root = TempDir::new().unwrap();
    let child = root.path().join("child");
    fs::create_dir_all(child.join("dir")).unwrap();
    fs::write(child.join("dir/foo.exe"), "foo").unwrap();
    fs::write(child.join("dir/bar.exe"), "bar").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(&child).arg(root.path()).assert().success();

    assert_eq!(fs::read_to_string(root.path().join("dir/foo.exe")).unwrap(), "foo");
    assert_eq!(fs::read_to_string(root.path().join("dir/bar.exe")).unwrap(), "bar");
    assert!(!child.join("child").exists());
}

#[test]
fn test_same_source_and_destination() {
    let fixture = TestFixture::new();
    fixture.create_files(2, 4);
    let before = snapshot(fixture.src.path());

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(fixture.src.path())
        .arg(fixture.src.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to copy"));

    assert_eq!(snapshot(fixture.src.path()), before);
}

#[test]
fn test_relative_and_absolute_spelling_leaves_file_intact() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, "precious").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.current_dir(dir.path())
        .arg("a.txt")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to copy"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "precious");
}

#[test]
fn test_quiet_suppresses_summary() {
    let fixture = TestFixture::new();
    fixture.create_files(1, 1);

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg("-q")
        .arg(fixture.src.path())
        .arg(fixture.dst.path().join("copied"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let fixture = TestFixture::new();
    fixture.create_files(1, 1);

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.env_remove("RUST_LOG")
        .arg("-v")
        .arg(fixture.src.path())
        .arg(fixture.dst.path().join("copied"))
        .assert()
        .success()
        .stderr(predicate::str::contains("copy finished"));
}
