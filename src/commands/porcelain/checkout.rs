use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::RepositoryError;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    /// Switch the working tree and HEAD to the tip of branch `name`
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let (branch_name, target_oid) = self.refs().resolve_branch(name)?;
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        let (_, current_commit) = self.head_commit()?;
        let target_commit = self.database().parse_object_as_commit(&target_oid)?;

        Migration::new(self, current_commit.files(), target_commit.files()).apply_changes()?;

        self.refs().set_current_branch(&branch_name)?;
        self.clear_index()?;

        writeln!(self.writer(), "Switched to branch '{branch_name}'")?;
        Ok(())
    }

    /// Restore `path` from `revision` (HEAD when absent) into the working tree
    ///
    /// The staging index is left as it is.
    pub fn checkout_file(&self, revision: Option<&str>, path: &str) -> anyhow::Result<()> {
        let commit_oid = match revision {
            Some(revision) => Revision::try_parse(revision)?.resolve(self)?,
            None => self.refs().read_head()?,
        };
        let commit = self.database().parse_object_as_commit(&commit_oid)?;

        let not_in_commit = || RepositoryError::PathNotInCommit(PathBuf::from(path));
        let path = self
            .workspace()
            .normalize(Path::new(path))
            .ok_or_else(not_in_commit)?;
        let blob_oid = commit.file_oid(&path).ok_or_else(not_in_commit)?;

        let content = self.database().get(blob_oid)?;
        self.workspace().write_file(&path, &content)?;

        tracing::debug!(path = %path.display(), commit = %commit_oid, "restored file");
        Ok(())
    }

    pub(crate) fn clear_index(&self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.clear();
        index.write_updates()
    }
}
