use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_twice_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "A twig version-control system already exists in the current directory.\n",
        ));

    // the existing history is untouched
    run_twig_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial commit"));
}
