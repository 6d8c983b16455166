use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::path::{Path, PathBuf};

impl Repository {
    /// Unstage `path`, and if HEAD tracks it, delete it and stage its removal
    pub fn rm(&self, path: &str) -> anyhow::Result<()> {
        let nothing_to_remove = || RepositoryError::NothingToRemove(PathBuf::from(path));

        let path = self
            .workspace()
            .normalize(Path::new(path))
            .ok_or_else(nothing_to_remove)?;

        let (_, head_commit) = self.head_commit()?;
        let mut index = self.index();
        let tracked = head_commit.tracks(&path);

        if index.addition(&path).is_none() && !tracked {
            return Err(nothing_to_remove().into());
        }

        index.discard_addition(&path);
        if tracked {
            self.workspace().remove_file(&path)?;
            tracing::debug!(path = %path.display(), "staged for removal");
            index.stage_removal(path);
        }

        index.write_updates()
    }
}
