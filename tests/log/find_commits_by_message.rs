use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn find_commits_by_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    commit_files(dir, &[("x.txt", "x")], "same message");
    let first_id = head_commit_id(dir);
    commit_files(dir, &[("y.txt", "y")], "same message");
    let second_id = head_commit_id(dir);
    commit_files(dir, &[("z.txt", "z")], "other message");

    let mut expected = [first_id, second_id];
    expected.sort();

    run_twig_command(dir, &["find", "same message"])
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", expected[0], expected[1]));

    let root_id = {
        let output = run_twig_command(dir, &["find", "initial commit"])
            .output()
            .expect("Failed to run twig");
        String::from_utf8(output.stdout).expect("stdout is not UTF-8")
    };
    assert_eq!(root_id.trim().len(), 40);
}
