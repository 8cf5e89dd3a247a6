//! Error handling integration tests for tcopy CLI.
//!
//! These tests verify:
//! - Usage errors exit with status 2
//! - Copy errors exit with status 1 and are reported on stderr
//! - Per-file failures do not stop the rest of the tree

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_operands() {
    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.assert().failure().code(2);

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg("only-source").assert().failure().code(2);
}

#[test]
fn test_source_not_found() {
    let dst = TempDir::new().unwrap();
    let missing = dst.path().join("does-not-exist");

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(&missing)
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: copying files: reading file metadata of"));

    assert!(!dst.path().join("out").exists());
}

#[test]
fn test_copy_into_own_descendant_rejected() {
    let src = TempDir::new().unwrap();
    fs::write(src.path().join("a.txt"), "a").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(src.path())
        .arg(src.path().join("inner"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("into its own descendant"));

    assert!(!src.path().join("inner").exists());
}

#[test]
fn test_directory_onto_file_fails() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("a.txt"), "a").unwrap();
    let target = dst.path().join("target");
    fs::write(&target, "i am a file").unwrap();

    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(src.path())
        .arg(&target)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("preparing directories for"));

    assert_eq!(fs::read_to_string(&target).unwrap(), "i am a file");
}

/// Unreadable files are reported while the rest of the tree is copied.
#[cfg(unix)]
#[test]
fn test_unreadable_file_reported_others_copied() {
    use std::os::unix::fs::PermissionsExt;

    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("ok1.txt"), "one").unwrap();
    fs::write(src.path().join("ok2.txt"), "two").unwrap();
    let locked = src.path().join("locked.txt");
    fs::write(&locked, "secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read anything; nothing to test then.
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let dest = dst.path().join("copied");
    let mut cmd = cargo_bin_cmd!("tcopy");
    cmd.arg(src.path())
        .arg(&dest)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: copying files: [opening"))
        .stderr(predicate::str::contains("locked.txt"));

    assert_eq!(fs::read_to_string(dest.join("ok1.txt")).unwrap(), "one");
    assert_eq!(fs::read_to_string(dest.join("ok2.txt")).unwrap(), "two");
    assert!(!dest.join("locked.txt").exists());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}
