use crate::common::command::{
    commit_files, head_commit_id, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn delete_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature/login"]).assert().success();
    run_twig_command(dir, &["checkout", "feature/login"]).assert().success();
    commit_files(dir, &[("login.txt", "login")], "Login work");
    let login_id = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["rm-branch", "feature/login"])
        .assert()
        .success()
        .stdout("");

    let branches_dir = dir.join(".twig").join("refs").join("branches");
    assert!(!branches_dir.join("feature").exists());
    assert!(branches_dir.join("master").is_file());

    // the branch's commits are kept
    run_twig_command(dir, &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {login_id}\n")));
    run_twig_command(dir, &["checkout", "feature/login"])
        .assert()
        .success()
        .stdout(predicate::eq("No such branch exists.\n"));
}
