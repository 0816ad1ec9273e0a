use crate::common::command::{current_branch, init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("master", "Cannot remove the current branch.\n")]
#[case("missing", "A branch with that name does not exist.\n")]
#[case("..", "A branch with that name does not exist.\n")]
fn delete_current_or_unknown_branch_fails(
    init_repository_dir: TempDir,
    #[case] name: &str,
    #[case] expected: &str,
) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm-branch", name])
        .assert()
        .success()
        .stdout(predicate::eq(expected));

    assert_eq!(current_branch(dir), "master");
    assert!(dir.join(".twig").join("refs").join("branches").join("master").is_file());
}
