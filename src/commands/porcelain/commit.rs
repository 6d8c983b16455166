use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        if self.index().is_empty() {
            return Err(RepositoryError::NoStagedChanges.into());
        }
        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        self.write_commit(message, None)?;

        Ok(())
    }

    /// Record HEAD's file table with the staged changes applied as a new commit
    /// on the current branch, then clear the staging index
    ///
    /// Staged blobs are already in the object store; they were stored when staged.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let (head_oid, head_commit) = self.head_commit()?;
        let mut index = self.index();

        let mut files = head_commit.files().clone();
        for (path, oid) in index.additions() {
            files.insert(path.clone(), oid.clone());
        }
        for path in index.removals() {
            files.remove(path);
        }

        let commit = Commit::new(
            Some(head_oid),
            merge_parent,
            load_timestamp_from_env(),
            files,
            message.to_string(),
        );
        let commit_oid = self.database().store(&commit)?;
        self.refs().update_head(&commit_oid)?;

        index.clear();
        index.write_updates()?;

        tracing::info!(oid = %commit_oid, files = commit.files().len(), "created commit");
        Ok(commit_oid)
    }
}
