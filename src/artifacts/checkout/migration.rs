//! Checkout migration
//!
//! Moves the working tree from one commit's file table to another's:
//!
//! 1. Detect untracked files that the target would overwrite
//! 2. Plan deletions (tracked now, absent from the target) and writes (every
//!    target path), loading all blob contents up front
//! 3. Apply the plan to the workspace
//!
//! Nothing touches the working tree until planning has succeeded, so a refused
//! checkout leaves every file as it was.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::FileTable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub struct Migration<'r> {
    repository: &'r Repository,
    current: &'r FileTable,
    target: &'r FileTable,
    deletions: Vec<PathBuf>,
    writes: Vec<(PathBuf, Bytes)>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &'r FileTable, target: &'r FileTable) -> Self {
        Self {
            repository,
            current,
            target,
            deletions: Vec::new(),
            writes: Vec::new(),
        }
    }

    pub fn deletions(&self) -> &[PathBuf] {
        &self.deletions
    }

    pub fn writes(&self) -> &[(PathBuf, Bytes)] {
        &self.writes
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.repository.workspace().apply_migration(self)
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        let conflicts = untracked_conflicts(self.repository, self.current, self.target)?;
        if !conflicts.is_empty() {
            return Err(RepositoryError::UncommittedUntrackedConflict(conflicts).into());
        }

        self.deletions = self
            .current
            .keys()
            .filter(|path| !self.target.contains_key(*path))
            .cloned()
            .collect();

        self.writes = self
            .target
            .iter()
            .map(|(path, oid)| Ok((path.clone(), self.load_blob_data(oid)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        tracing::debug!(
            deletions = self.deletions.len(),
            writes = self.writes.len(),
            "planned checkout"
        );
        Ok(())
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.repository.database().get(object_id)
    }
}

/// Paths where writing `target` would clobber working-tree content the current
/// commit does not track
///
/// Three shapes are in the way:
///
/// - an untracked file whose content differs from what `target` holds for it
/// - a directory at a target file path that holds files the current commit does not track
/// - an untracked non-directory standing where a target path needs a parent directory
///
/// Paths are reported once each, sorted.
pub fn untracked_conflicts(
    repository: &Repository,
    current: &FileTable,
    target: &FileTable,
) -> anyhow::Result<Vec<PathBuf>> {
    let workspace = repository.workspace();

    let mut conflicts = BTreeSet::new();
    for (path, target_oid) in target {
        if let Some(parent) = untracked_parent(repository, current, path) {
            conflicts.insert(parent.to_path_buf());
            continue;
        }

        if workspace.is_dir(path) {
            let stale = workspace
                .list_files_under(path)?
                .into_iter()
                .any(|inner| !current.contains_key(&inner));
            if stale {
                conflicts.insert(path.clone());
            }
            continue;
        }

        if current.contains_key(path) || !workspace.is_file(path) {
            continue;
        }
        if &workspace.blob_id(path)? != target_oid {
            conflicts.insert(path.clone());
        }
    }

    Ok(conflicts.into_iter().collect())
}

/// Nearest ancestor of `path` that exists as a non-directory the current commit does not track
fn untracked_parent<'p>(
    repository: &Repository,
    current: &FileTable,
    path: &'p Path,
) -> Option<&'p Path> {
    let workspace = repository.workspace();

    path.parent()?
        .ancestors()
        .filter(|parent| !parent.as_os_str().is_empty())
        .find(|parent| {
            let full = workspace.path().join(parent);
            full.symlink_metadata().is_ok() && !full.is_dir() && !current.contains_key(*parent)
        })
}
