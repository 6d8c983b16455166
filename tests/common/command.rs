use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose master branch holds one commit tracking `1.txt` and `a/2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    commit_files(
        repository_dir.path(),
        &[("1.txt", "one\n"), ("a/2.txt", "two\n")],
        "Initial commit",
    );

    repository_dir
}

pub fn run_sprig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("Failed to find sprig binary");
    cmd.env("SPRIG_COMMIT_DATE", COMMIT_DATE);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn sprig_commit(dir: &Path, message: &str) -> Command {
    run_sprig_command(dir, &["commit", message])
}

/// Write, stage and commit every `(path, content)` pair
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (path, content) in files {
        write_file(FileSpec::new(dir.join(path), content.to_string()));
        run_sprig_command(dir, &["add", path]).assert().success();
    }

    sprig_commit(dir, message).assert().success();
}

/// Stage the removal of every path and commit
pub fn commit_removals(dir: &Path, paths: &[&str], message: &str) {
    for path in paths {
        run_sprig_command(dir, &["rm", path]).assert().success();
    }

    sprig_commit(dir, message).assert().success();
}

pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".sprig").join("refs").join("heads").join(branch);
    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read branch {:?}: {}", ref_path, e))
        .trim()
        .to_string()
}

pub fn current_branch(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".sprig").join("HEAD"))
        .expect("Failed to read HEAD");
    head.trim()
        .strip_prefix("ref: refs/heads/")
        .expect("HEAD is not a branch reference")
        .to_string()
}

pub fn head_commit_id(dir: &Path) -> String {
    branch_commit_id(dir, &current_branch(dir))
}

pub fn status_output(dir: &Path) -> String {
    let output = run_sprig_command(dir, &["status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("status output is not UTF-8")
}
