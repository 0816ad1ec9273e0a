use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reset_blocked_by_untracked_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    commit_files(dir, &[("later.txt", "later")], "Add later");
    let later_id = head_commit_id(dir);
    run_twig_command(dir, &["rm", "later.txt"]).assert().success();
    run_twig_command(dir, &["commit", "Remove later"]).assert().success();
    let head_before = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("later.txt"), "untracked now".to_string()));

    run_twig_command(dir, &["reset", &later_id])
        .assert()
        .success()
        .stdout(predicate::eq(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        ));

    assert_eq!(head_commit_id(dir), head_before);
    assert_eq!(read_file(&dir.join("later.txt")), "untracked now");
}
