use crate::common::command::{
    branch_commit_id, commit_files, head_commit_id, run_sprig_command,
};
use crate::common::file::read_file;
use crate::merge::{branched_repository_dir, switch_to};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// History after the fixture:
///
/// ```text
/// A - B ----- M1 (master)
///  \         /
///   F1 ------   (feature)
/// ```
///
/// `F1` rewrites `1.txt`, `B` adds `m.txt`, and `M1` merges feature into master.
#[fixture]
fn merged_once_dir(branched_repository_dir: TempDir) -> TempDir {
    let dir = branched_repository_dir.path();
    commit_files(dir, &[("m.txt", "master\n")], "B");
    switch_to(dir, "feature");
    commit_files(dir, &[("1.txt", "v1\n")], "F1");
    switch_to(dir, "master");

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&dir.join("1.txt")), "v1\n");

    branched_repository_dir
}

#[rstest]
fn second_merge_uses_previous_merge_as_split_point(merged_once_dir: TempDir) {
    let dir = merged_once_dir.path();
    switch_to(dir, "feature");
    commit_files(dir, &[("1.txt", "v2\n")], "F2");
    switch_to(dir, "master");

    // splitting at A instead of F1 would make 1.txt a conflict
    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("1.txt")), "v2\n");
    assert_eq!(read_file(&dir.join("m.txt")), "master\n");
}

#[rstest]
fn merged_branch_is_an_ancestor_through_merge_parent(merged_once_dir: TempDir) {
    let dir = merged_once_dir.path();
    let master_tip = head_commit_id(dir);

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir), master_tip);
}

#[rstest]
fn merged_into_branch_fast_forwards_through_merge_parent(merged_once_dir: TempDir) {
    let dir = merged_once_dir.path();
    let master_tip = head_commit_id(dir);
    switch_to(dir, "feature");
    assert!(!dir.join("m.txt").exists());

    run_sprig_command(dir, &["merge", "master"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(branch_commit_id(dir, "feature"), master_tip);
    assert_eq!(read_file(&dir.join("m.txt")), "master\n");
}

#[rstest]
fn history_lookups_follow_both_parents(merged_once_dir: TempDir) {
    let dir = merged_once_dir.path();
    let feature_tip = branch_commit_id(dir, "feature");
    run_sprig_command(dir, &["rm-branch", "feature"])
        .assert()
        .success();

    // F1 is only reachable through the merge parent of M1
    run_sprig_command(dir, &["find", "F1"])
        .assert()
        .success()
        .stdout(format!("{feature_tip}\n"));

    run_sprig_command(dir, &["checkout", &feature_tip[..10], "--", "1.txt"])
        .assert()
        .success();
}
