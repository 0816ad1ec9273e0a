use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merge_ancestor_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "old"]).assert().success();
    commit_files(dir, &[("1.txt", "one, newer")], "Newer");
    let head_before = head_commit_id(dir);

    run_twig_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "Given branch is an ancestor of the current branch.\n",
        ));

    assert_eq!(head_commit_id(dir), head_before);
    assert_eq!(read_file(&dir.join("1.txt")), "one, newer");
}
