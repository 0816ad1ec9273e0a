use crate::common::command::{
    branch_commit_id, commit_files, current_branch, head_commit_id, init_repository_dir,
    run_twig_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merge_fast_forward(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();

    run_twig_command(dir, &["checkout", "feature"]).assert().success();
    commit_files(dir, &[("feature.txt", "feature")], "Feature 1");
    commit_files(dir, &[("1.txt", "one from feature")], "Feature 2");
    let feature_id = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("Current branch fast-forwarded.\n"));

    assert_eq!(current_branch(dir), "master");
    assert_eq!(branch_commit_id(dir, "master"), feature_id);
    assert_eq!(read_file(&dir.join("feature.txt")), "feature");
    assert_eq!(read_file(&dir.join("1.txt")), "one from feature");
}
