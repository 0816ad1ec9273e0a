use crate::common::command::{head_commit_id, init_repository_dir, twig_commit};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_without_staged_changes_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head_before = head_commit_id(dir);

    twig_commit(dir, "Nothing here")
        .assert()
        .success()
        .stdout(predicate::eq("No changes added to the commit.\n"));

    assert_eq!(head_commit_id(dir), head_before);
}
