use crate::common::command::{
    DEFAULT_COMMIT_DATE_LINE, head_commit_id, repository_dir, run_twig_command, twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_shows_edit_history(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    let root_id = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("f.txt"), "hello".to_string()));
    run_twig_command(dir, &["add", "f.txt"]).assert().success();
    twig_commit(dir, "first").assert().success();
    let first_id = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("f.txt"), "world".to_string()));
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\nf.txt (modified)\n",
        ));

    run_twig_command(dir, &["add", "f.txt"]).assert().success();
    twig_commit(dir, "second").assert().success();
    let second_id = head_commit_id(dir);

    let expected_log = format!(
        "===\ncommit {second_id}\n{DEFAULT_COMMIT_DATE_LINE}\nsecond\n\n\
         ===\ncommit {first_id}\n{DEFAULT_COMMIT_DATE_LINE}\nfirst\n\n\
         ===\ncommit {root_id}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"
    );
    let output = run_twig_command(dir, &["log"]).output()?;
    assert_eq!(String::from_utf8(output.stdout)?, expected_log);

    Ok(())
}
