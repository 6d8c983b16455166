use crate::common::command::{commit_files, head_commit_id, run_sprig_command};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::merge::{branched_repository_dir, switch_to};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_unknown_branch_fails(branched_repository_dir: TempDir) {
    run_sprig_command(branched_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .code(1)
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn merge_with_staged_changes_fails_before_self_merge_check(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    write_file(FileSpec::new(dir.join("3.txt"), "three\n".to_string()));
    run_sprig_command(dir, &["add", "3.txt"]).assert().success();

    run_sprig_command(dir, &["merge", "master"])
        .assert()
        .code(1)
        .stdout("You have uncommitted changes.\n");
}

#[rstest]
fn merge_with_itself_fails(branched_repository_dir: TempDir) {
    run_sprig_command(branched_repository_dir.path(), &["merge", "master"])
        .assert()
        .code(1)
        .stdout("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merge_refuses_to_overwrite_untracked_file(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    switch_to(dir, "feature");
    commit_files(dir, &[("x.txt", "feature\n")], "feature adds x");
    switch_to(dir, "master");
    commit_files(dir, &[("1.txt", "uno\n")], "master work");
    let master_tip = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("x.txt"), "mine\n".to_string()));

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .code(1)
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("x.txt")), "mine\n");
    assert_eq!(read_file(&dir.join("1.txt")), "uno\n");
    assert_eq!(head_commit_id(dir), master_tip);
}

#[rstest]
fn merge_refuses_untracked_file_in_place_of_a_directory(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    switch_to(dir, "feature");
    commit_files(dir, &[("y/z.txt", "zed\n")], "feature adds y/z.txt");
    switch_to(dir, "master");
    commit_files(dir, &[("1.txt", "uno\n")], "master work");
    let master_tip = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("y"), "mine\n".to_string()));

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .code(1)
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("y")), "mine\n");
    assert_eq!(head_commit_id(dir), master_tip);
}

#[rstest]
fn merge_ancestor_is_a_no_op(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    commit_files(dir, &[("1.txt", "uno\n")], "master moves on");
    let master_tip = head_commit_id(dir);

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir), master_tip);
}
