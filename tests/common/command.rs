use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Timestamp stamped on every commit unless a test picks its own
pub const DEFAULT_COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// `Date:` line of a commit made at [`DEFAULT_COMMIT_DATE`]
pub const DEFAULT_COMMIT_DATE_LINE: &str = "Date: Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit on top of the root tracking
/// `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let files = [
        ("1.txt", "one"),
        ("a/2.txt", "two"),
        ("a/b/3.txt", "three"),
    ];
    for (path, content) in files {
        write_file(FileSpec::new(
            repository_dir.path().join(path),
            content.to_string(),
        ));
        run_twig_command(repository_dir.path(), &["add", path])
            .assert()
            .success();
    }

    twig_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![
        ("NO_PAGER", "1"),
        ("TWIG_COMMIT_DATE", DEFAULT_COMMIT_DATE),
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    run_twig_command(dir, &["commit", message])
}

pub fn twig_commit_with_timestamp(dir: &Path, message: &str, timestamp: &str) -> Command {
    let mut cmd = twig_commit(dir, message);
    cmd.env("TWIG_COMMIT_DATE", timestamp);
    cmd
}

/// Write, stage and commit files in one go
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (path, content) in files {
        write_file(FileSpec::new(dir.join(path), content.to_string()));
        run_twig_command(dir, &["add", path]).assert().success();
    }

    twig_commit(dir, message).assert().success();
}

/// Name of the checked-out branch, read from `.twig/refs/head`
pub fn current_branch(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".twig").join("refs").join("head"))
        .expect("Failed to read head");

    head.trim()
        .strip_prefix("ref: refs/branches/")
        .expect("head is not a branch reference")
        .to_string()
}

/// Commit ID a branch points at
pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let branch_path = dir.join(".twig").join("refs").join("branches").join(branch);

    std::fs::read_to_string(branch_path)
        .expect("Failed to read branch")
        .trim()
        .to_string()
}

/// Tip of the checked-out branch
pub fn head_commit_id(dir: &Path) -> String {
    branch_commit_id(dir, &current_branch(dir))
}

/// Stdout of a command that must succeed
pub fn command_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_twig_command(dir, args)
        .output()
        .expect("Failed to run twig");
    assert!(output.status.success(), "twig {:?} failed", args);

    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}
