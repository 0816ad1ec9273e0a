use crate::common::command::{branch_commit_id, commit_files, init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature"]).assert().success();
    let feature_id = branch_commit_id(dir, "feature");
    commit_files(dir, &[("new.txt", "new")], "Move master");

    run_twig_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("A branch with that name already exists.\n"));
    run_twig_command(dir, &["branch", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("A branch with that name already exists.\n"));

    assert_eq!(branch_commit_id(dir, "feature"), feature_id);
}
