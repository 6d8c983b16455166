use crate::common::command::{
    branch_commit_id, commit_files, commit_removals, head_commit_id, run_sprig_command,
    status_output,
};
use crate::common::file::read_file;
use crate::merge::{branched_repository_dir, switch_to};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///
/// ```text
///   A
///  / \
/// B   C
/// |   |
/// master  feature
/// ```
///
/// Both sides rewrite `1.txt`; master rewrites and feature deletes `a/2.txt`.
#[rstest]
fn merge_records_conflicts_and_still_commits(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    switch_to(dir, "feature");
    commit_files(dir, &[("1.txt", "feature\n")], "feature rewrites one");
    commit_removals(dir, &["a/2.txt"], "feature drops two");
    let feature_tip = head_commit_id(dir);

    switch_to(dir, "master");
    commit_files(dir, &[("1.txt", "master\n"), ("a/2.txt", "master two\n")], "master rewrites");
    let master_tip = head_commit_id(dir);

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\nmaster\n=======\nfeature\n>>>>>>>\n"
    );
    assert_eq!(
        read_file(&dir.join("a").join("2.txt")),
        "<<<<<<< HEAD\nmaster two\n=======\n>>>>>>>\n"
    );

    let merge_commit = head_commit_id(dir);
    assert_ne!(merge_commit, master_tip);
    assert_eq!(branch_commit_id(dir, "feature"), feature_tip);

    // conflicted files were committed as written
    let status = status_output(dir);
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));

    let log = run_sprig_command(dir, &["log"]).assert().success().get_output().stdout.clone();
    let log = String::from_utf8(log).expect("log output is not UTF-8");
    assert!(log.starts_with(&format!(
        "===\ncommit {merge_commit}\nMerge: {} {}\nDate: Sun Jan 01 12:00:00 2023 +0000\nMerged feature into master.\n\n",
        &master_tip[..7],
        &feature_tip[..7],
    )));
}
