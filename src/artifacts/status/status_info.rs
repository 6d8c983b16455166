use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;

/// Snapshot of the repository state as reported by `status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let repository = self.repository;
        let (_, head_commit) = repository.head_commit()?;
        let head_files = head_commit.files();
        let index = repository.index();
        let workspace = repository.workspace();

        let mut workspace_changeset = ChangeSet::new();
        let mut untracked_files = FileSet::new();

        // tracked files changed behind the index's back
        for (path, head_oid) in head_files {
            if index.addition(path).is_some() || index.is_staged_for_removal(path) {
                continue;
            }

            if !workspace.is_file(path) {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &workspace.blob_id(path)? != head_oid {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        // staged content that no longer matches the working tree
        for (path, staged_oid) in index.additions() {
            if !workspace.is_file(path) {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &workspace.blob_id(path)? != staged_oid {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        for path in workspace.list_files()? {
            let tracked = head_files.contains_key(&path);
            let staged = index.addition(&path).is_some();

            if (!tracked && !staged) || index.is_staged_for_removal(&path) {
                untracked_files.insert(path);
            }
        }

        Ok(StatusInfo {
            branches: repository.refs().list_branches()?,
            current_branch: repository.refs().current_branch()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(f, "*{branch}")?;
            } else {
                writeln!(f, "{branch}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for path in &self.staged_files {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for path in &self.removed_files {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(f, "{} {change}", path.display())?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for path in &self.untracked_files {
            writeln!(f, "{}", path.display())?;
        }
        writeln!(f)
    }
}
