use crate::common::command::{init_repository_dir, run_sprig_command};
use assert_fs::TempDir;
use rstest::fixture;

mod merge_conflict;
mod merge_deletion;
mod merge_fast_forward;
mod merge_guards;
mod merge_with_prior_merge;

/// `init_repository_dir` with a `feature` branch created at master's tip
#[fixture]
pub fn branched_repository_dir(init_repository_dir: TempDir) -> TempDir {
    run_sprig_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    init_repository_dir
}

pub fn switch_to(dir: &std::path::Path, branch: &str) {
    run_sprig_command(dir, &["checkout", branch])
        .assert()
        .success();
}
