use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_untracked_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("untracked.txt"), "x".to_string()));

    run_twig_command(dir, &["rm", "untracked.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("No reason to remove the file.\n"));

    assert!(dir.join("untracked.txt").is_file());
}
