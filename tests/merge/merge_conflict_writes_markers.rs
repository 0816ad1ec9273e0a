use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merge_conflict_writes_markers(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("f.txt", "a\n")], "Split");
    run_twig_command(dir, &["branch", "other"]).assert().success();

    commit_files(dir, &[("f.txt", "b\n")], "Current edit");
    let current_id = head_commit_id(dir);

    run_twig_command(dir, &["checkout", "other"]).assert().success();
    commit_files(dir, &[("f.txt", "c")], "Other edit");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout(predicate::eq("Encountered a merge conflict.\n"));

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nb\n=======\nc\n>>>>>>> other\n"
    );

    // the conflicted content is committed as part of the merge
    assert_ne!(head_commit_id(dir), current_id);
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\n\n",
        ));
    run_twig_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged other into master.\n"));
}
