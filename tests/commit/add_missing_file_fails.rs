use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("missing.txt")]
#[case("a")]
#[case("../outside.txt")]
fn add_missing_file_fails(init_repository_dir: TempDir, #[case] path: &str) {
    run_twig_command(init_repository_dir.path(), &["add", path])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist.\n"));
}
