use crate::common::command::{
    branch_commit_id, commit_files, head_commit_id, run_sprig_command, status_output,
};
use crate::common::file::read_file;
use crate::merge::{branched_repository_dir, switch_to};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///
/// ```text
/// A (master)
///  \
///   F1 - F2 (feature)
/// ```
#[rstest]
fn merge_descendant_fast_forwards(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    switch_to(dir, "feature");
    commit_files(dir, &[("1.txt", "uno\n")], "F1");
    commit_files(dir, &[("f.txt", "feature\n")], "F2");
    let feature_tip = head_commit_id(dir);
    switch_to(dir, "master");

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(branch_commit_id(dir, "master"), feature_tip);
    assert_eq!(branch_commit_id(dir, "feature"), feature_tip);
    assert_eq!(read_file(&dir.join("1.txt")), "uno\n");
    assert_eq!(read_file(&dir.join("f.txt")), "feature\n");
    assert!(status_output(dir).contains("=== Untracked Files ===\n\n"));

    let log = run_sprig_command(dir, &["log"]).assert().success().get_output().stdout.clone();
    let log = String::from_utf8(log).expect("log output is not UTF-8");
    assert!(!log.contains("Merge:"));
    assert!(!log.contains("Merged"));
}
