use crate::common::command::{init_repository_dir, run_twig_command, twig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_unchanged_file_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n1.txt\n"));

    // back to the committed content
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));
    twig_commit(dir, "Nothing changed")
        .assert()
        .success()
        .stdout(predicate::eq("No changes added to the commit.\n"));
}
