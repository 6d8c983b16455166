//! Branch pointers and HEAD
//!
//! Branches live under `refs/heads/` as files holding a 40-character commit id.
//! `HEAD` is always symbolic: it holds `ref: refs/heads/<branch>` and names the
//! checked-out branch, so the HEAD commit is that branch's tip.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::{prune_empty_dirs, write_atomically};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.sprig`)
    path: Box<Path>,
}

impl Refs {
    /// The branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content.trim())
            .with_context(|| format!("HEAD is not a symbolic ref: {:?}", content.trim()))?;

        BranchName::try_parse_ref_path(&symref_match[1])
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        tracing::debug!(branch = %branch_name, "pointing HEAD at branch");

        write_atomically(
            &self.head_path(),
            format!("ref: {}\n", branch_name.to_ref_path()).as_bytes(),
        )
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// The tip of `branch_name`, or `None` when no such branch exists
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// The HEAD commit, i.e. the tip of the current branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let branch_name = self.current_branch()?;

        self.read_branch(&branch_name)?
            .with_context(|| format!("current branch {branch_name} has no commit"))
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(branch = %branch_name, %oid, "updating branch");

        write_atomically(
            &self.branch_path(branch_name),
            format!("{oid}\n").as_bytes(),
        )
    }

    /// Move the current branch (and therefore HEAD) to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_path(branch_name).exists() {
            return Err(RepositoryError::BranchExists(branch_name.to_string()).into());
        }

        self.update_branch(branch_name, oid)
    }

    /// Delete the pointer only; commits stay in the object store
    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_branch(branch_name)?
            .ok_or_else(|| RepositoryError::NoSuchBranch(branch_name.to_string()))?;

        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        if let Some(parent) = branch_path.parent() {
            prune_empty_dirs(parent, &self.heads_path())?;
        }

        tracing::debug!(branch = %branch_name, %oid, "deleted branch");
        Ok(oid)
    }

    /// Resolve a user-supplied branch name; unknown or malformed names are `NoSuchBranch`
    pub fn resolve_branch(&self, name: &str) -> anyhow::Result<(BranchName, ObjectId)> {
        let no_such_branch = || RepositoryError::NoSuchBranch(name.to_string());

        let branch_name = BranchName::try_parse(name.to_string()).map_err(|_| no_such_branch())?;
        let oid = self.read_branch(&branch_name)?.ok_or_else(no_such_branch)?;

        Ok((branch_name, oid))
    }

    /// Every branch, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| -> anyhow::Result<BranchName> {
                let relative_path = entry.path().strip_prefix(&heads_path)?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }

    /// Every branch with its tip, sorted by name
    pub fn branch_tips(&self) -> anyhow::Result<Vec<(BranchName, ObjectId)>> {
        self.list_branches()?
            .into_iter()
            .map(|branch_name| {
                let oid = self
                    .read_branch(&branch_name)?
                    .with_context(|| format!("branch {branch_name} vanished while listing"))?;
                Ok((branch_name, oid))
            })
            .collect()
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        self.heads_path().join(branch_name.to_path())
    }
}
