use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    /// Stage the current content of `path` for the next commit
    ///
    /// Content identical to what HEAD already tracks is not staged, and any pending
    /// addition for the path is dropped instead. A pending removal is always cleared.
    pub fn add(&self, path: &str) -> anyhow::Result<()> {
        let path = self
            .workspace()
            .normalize(Path::new(path))
            .filter(|path| self.workspace().is_file(path))
            .ok_or_else(|| RepositoryError::FileNotFound(path.into()))?;

        let (_, head_commit) = self.head_commit()?;
        let blob = Blob::new(self.workspace().read_file(&path)?);
        let blob_id = blob.object_id()?;

        let mut index = self.index();
        index.unstage_removal(&path);

        if head_commit.file_oid(&path) == Some(&blob_id) {
            index.discard_addition(&path);
            tracing::debug!(path = %path.display(), "content matches HEAD, nothing staged");
        } else {
            self.database().store(&blob)?;
            tracing::debug!(path = %path.display(), oid = %blob_id, "staged for addition");
            index.stage_addition(path, blob_id);
        }

        index.write_updates()
    }
}
