use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("double..dot")]
#[case("trailing/")]
#[case("name.lock")]
#[case("with space")]
#[case("star*")]
#[case("master/child")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Invalid branch name: "));

    let branches = init_repository_dir
        .path()
        .join(".twig")
        .join("refs")
        .join("branches");
    assert_eq!(std::fs::read_dir(branches).unwrap().count(), 1);
}
