use crate::common::command::{head_commit_id, init_repository_dir, run_twig_command, twig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
fn commit_with_blank_message_fails(init_repository_dir: TempDir, #[case] message: &str) {
    let dir = init_repository_dir.path();
    let head_before = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();

    twig_commit(dir, message)
        .assert()
        .success()
        .stdout(predicate::eq("Please enter a commit message.\n"));

    assert_eq!(head_commit_id(dir), head_before);
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\nnew.txt\n"));
}
