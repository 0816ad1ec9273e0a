use crate::common::command::{init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, delete_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn status_lists_every_section(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "other"]).assert().success();
    run_twig_command(dir, &["branch", "feature/x"]).assert().success();

    // staged, then modified again
    write_file(FileSpec::new(dir.join("staged.txt"), "v1".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "v2".to_string()));

    // staged, then deleted
    write_file(FileSpec::new(dir.join("gone.txt"), "gone".to_string()));
    run_twig_command(dir, &["add", "gone.txt"]).assert().success();
    delete_file(&dir.join("gone.txt"));

    // tracked and removed
    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();

    // tracked, modified and deleted without staging
    write_file(FileSpec::new(dir.join("1.txt"), "one, edited".to_string()));
    delete_file(&dir.join("a").join("b").join("3.txt"));

    write_file(FileSpec::new(dir.join("zzz.txt"), "untracked".to_string()));

    let output = run_twig_command(dir, &["status"]).output()?;

    assert_eq!(
        String::from_utf8(output.stdout)?,
        "=== Branches ===\nfeature/x\n*master\nother\n\n\
         === Staged Files ===\ngone.txt\nstaged.txt\n\n\
         === Removed Files ===\na/2.txt\n\n\
         === Modifications Not Staged For Commit ===\n\
         1.txt (modified)\n\
         a/b/3.txt (deleted)\n\
         gone.txt (deleted)\n\
         staged.txt (modified)\n\n\
         === Untracked Files ===\nzzz.txt\n\n"
    );

    Ok(())
}
