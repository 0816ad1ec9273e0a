use crate::common::command::{
    commit_files, current_branch, init_repository_dir, run_twig_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_blocked_by_untracked_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature"]).assert().success();
    run_twig_command(dir, &["checkout", "feature"]).assert().success();
    commit_files(dir, &[("shared.txt", "from feature")], "Add shared");
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    assert!(!dir.join("shared.txt").exists());

    write_file(FileSpec::new(dir.join("shared.txt"), "precious".to_string()));
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));

    run_twig_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        ));

    // nothing was touched
    assert_eq!(current_branch(dir), "master");
    assert_eq!(read_file(&dir.join("shared.txt")), "precious");
    assert_eq!(read_file(&dir.join("1.txt")), "edited");
}
