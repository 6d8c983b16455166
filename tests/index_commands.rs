use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    commit_files, head_commit_id, init_repository_dir, repository_dir, run_sprig_command,
    sprig_commit, status_output,
};
use common::file::{FileSpec, read_file, write_file, write_generated_files};

#[rstest]
fn add_stages_new_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("3.txt"), "three\n".to_string()));

    run_sprig_command(dir, &["add", "3.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        status_output(dir),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n3.txt\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );
}

#[rstest]
fn add_missing_file_fails(init_repository_dir: TempDir) {
    run_sprig_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .code(1)
        .stdout("File does not exist.\n");
}

#[rstest]
fn add_refuses_file_names_with_line_breaks(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a\nb.txt"), "split\n".to_string()));

    run_sprig_command(dir, &["add", "a\nb.txt"])
        .assert()
        .code(1)
        .stdout("File does not exist.\n");

    sprig_commit(dir, "nothing staged")
        .assert()
        .code(1)
        .stdout("No changes added to the commit.\n");
    run_sprig_command(dir, &["log"]).assert().success();
}

#[rstest]
fn add_unchanged_tracked_file_stages_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_sprig_command(dir, &["add", "1.txt"]).assert().success();

    sprig_commit(dir, "nothing to commit")
        .assert()
        .code(1)
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn reverting_a_staged_change_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "changed\n".to_string()));
    run_sprig_command(dir, &["add", "1.txt"]).assert().success();
    assert!(status_output(dir).contains("=== Staged Files ===\n1.txt\n"));

    write_file(FileSpec::new(dir.join("1.txt"), "one\n".to_string()));
    run_sprig_command(dir, &["add", "1.txt"]).assert().success();
    assert!(status_output(dir).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn add_files_in_nested_directories(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_sprig_command(dir, &["init"]).assert().success();

    let nested = dir.join("a").join("b");
    let files = write_generated_files(&nested, 3);
    for file in &files {
        let relative = file.path.strip_prefix(dir).expect("file outside repository");
        run_sprig_command(dir, &["add", &relative.to_string_lossy()])
            .assert()
            .success();
    }

    sprig_commit(dir, "nested files").assert().success();

    let status = status_output(dir);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\n\n"));
}

#[rstest]
fn rm_tracked_file_deletes_and_stages_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_sprig_command(dir, &["rm", "a/2.txt"])
        .assert()
        .success()
        .stdout("");

    assert!(!dir.join("a").join("2.txt").exists());
    assert!(!dir.join("a").exists());
    assert!(status_output(dir).contains("=== Removed Files ===\na/2.txt\n\n"));

    sprig_commit(dir, "remove 2").assert().success();
    assert!(status_output(dir).contains("=== Removed Files ===\n\n"));
}

#[rstest]
fn rm_staged_untracked_file_only_unstages(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("3.txt"), "three\n".to_string()));
    run_sprig_command(dir, &["add", "3.txt"]).assert().success();

    run_sprig_command(dir, &["rm", "3.txt"]).assert().success();

    assert_eq!(read_file(&dir.join("3.txt")), "three\n");
    let status = status_output(dir);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\n3.txt\n\n"));
}

#[rstest]
fn rm_unknown_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("3.txt"), "three\n".to_string()));

    run_sprig_command(dir, &["rm", "3.txt"])
        .assert()
        .code(1)
        .stdout("No reason to remove the file.\n");
}

#[rstest]
fn add_after_rm_cancels_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_sprig_command(dir, &["rm", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one\n".to_string()));
    run_sprig_command(dir, &["add", "1.txt"]).assert().success();

    let status = status_output(dir);
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Staged Files ===\n\n"));
    sprig_commit(dir, "no-op").assert().code(1);
    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn status_reports_unstaged_modifications_and_deletions(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("3.txt", "three\n")], "add 3");

    write_file(FileSpec::new(dir.join("1.txt"), "edited\n".to_string()));
    std::fs::remove_file(dir.join("3.txt")).expect("Failed to delete 3.txt");
    write_file(FileSpec::new(dir.join("4.txt"), "staged\n".to_string()));
    run_sprig_command(dir, &["add", "4.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("4.txt"), "edited after staging\n".to_string()));
    write_file(FileSpec::new(dir.join("z.txt"), "untracked\n".to_string()));

    assert_eq!(
        status_output(dir),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n4.txt\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n1.txt (modified)\n3.txt (deleted)\n4.txt (modified)\n\n\
         === Untracked Files ===\nz.txt\n\n"
    );
}
