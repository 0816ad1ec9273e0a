use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_twig_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_file_from_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let initial_id = head_commit_id(dir);

    commit_files(dir, &[("1.txt", "one, second version")], "Second commit");
    let head_before = head_commit_id(dir);

    run_twig_command(dir, &["checkout", &initial_id[..8], "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    // head does not move and nothing gets staged
    assert_eq!(head_commit_id(dir), head_before);
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\n1.txt (modified)\n",
        ));

    run_twig_command(dir, &["checkout", &initial_id, "--", "missing.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist in that commit.\n"));
}
