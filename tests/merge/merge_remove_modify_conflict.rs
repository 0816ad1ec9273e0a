use crate::common::command::{commit_files, init_repository_dir, run_twig_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merge_remove_modify_conflict(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();

    // master deletes 1.txt, other modifies it
    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    run_twig_command(dir, &["commit", "Delete one"]).assert().success();

    run_twig_command(dir, &["checkout", "other"]).assert().success();
    commit_files(dir, &[("1.txt", "one, edited\n")], "Edit one");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::eq("Encountered a merge conflict.\n"));

    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\n=======\none, edited\n>>>>>>> other\n"
    );
}
