use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, delete_file, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_file_from_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "scratch".to_string()));
    delete_file(&dir.join("a").join("b").join("3.txt"));

    run_twig_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success()
        .stdout("");
    run_twig_command(dir, &["checkout", "--", "a/b/3.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(read_file(&dir.join("a").join("b").join("3.txt")), "three");

    run_twig_command(dir, &["checkout", "--", "untracked.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist in that commit.\n"));
}
