use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_staged_file_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();
    run_twig_command(dir, &["rm", "new.txt"]).assert().success();

    // an untracked file is unstaged but left in place
    assert!(dir.join("new.txt").is_file());
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ))
        .stdout(predicate::str::contains("=== Untracked Files ===\nnew.txt\n"));
}
