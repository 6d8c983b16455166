use crate::common::command::{
    branch_commit_id, commit_files, commit_removals, head_commit_id, run_sprig_command,
    status_output,
};
use crate::common::file::read_file;
use crate::merge::{branched_repository_dir, switch_to};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_applies_one_sided_changes(branched_repository_dir: TempDir) {
    let dir = branched_repository_dir.path();
    commit_files(dir, &[("3.txt", "three\n")], "master adds three");
    switch_to(dir, "feature");
    commit_files(dir, &[("3.txt", "three\n")], "feature adds three too");
    commit_removals(dir, &["a/2.txt"], "feature drops two");
    commit_files(dir, &[("new.txt", "new\n")], "feature adds new");
    let feature_tip = head_commit_id(dir);

    switch_to(dir, "master");
    commit_removals(dir, &["1.txt"], "master drops one");

    run_sprig_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("");

    // removed only on master: stays removed
    assert!(!dir.join("1.txt").exists());
    // removed only on feature: removed by the merge
    assert!(!dir.join("a").join("2.txt").exists());
    // added only on feature: taken
    assert_eq!(read_file(&dir.join("new.txt")), "new\n");
    // added identically on both sides: kept
    assert_eq!(read_file(&dir.join("3.txt")), "three\n");

    assert_eq!(branch_commit_id(dir, "feature"), feature_tip);
    assert!(status_output(dir).ends_with(
        "=== Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    ));

    run_sprig_command(dir, &["find", "Merged feature into master."])
        .assert()
        .success()
        .stdout(format!("{}\n", head_commit_id(dir)));
}
