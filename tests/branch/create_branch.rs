use crate::common::command::{
    branch_commit_id, current_branch, head_commit_id, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("feature")]
#[case("feature/login")]
#[case("release-1.0")]
fn create_branch(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", name])
        .assert()
        .success()
        .stdout("");

    // head stays on master, the new branch points at the same commit
    assert_eq!(current_branch(dir), "master");
    assert_eq!(branch_commit_id(dir, name), head_commit_id(dir));
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{name}\n")));
}
