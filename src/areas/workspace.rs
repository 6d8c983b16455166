use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::{prune_empty_dirs, write_atomically};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into a tracked, working-tree-relative path
    ///
    /// Returns `None` for paths escaping the working tree, pointing into the
    /// repository directory, or that a commit cannot record: non-UTF-8 names and
    /// names containing line breaks.
    pub fn normalize(&self, path: &Path) -> Option<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(&self.path).ok()?
        } else {
            path
        };

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str()?;
                    if name.contains(['\n', '\r']) {
                        return None;
                    }
                    normalized.push(name)
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return None;
                    }
                }
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        if normalized.as_os_str().is_empty() || Self::is_ignored(&normalized) {
            return None;
        }

        Some(normalized)
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let path = self.path.join(file_path);
        let content = std::fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Blob id the file's current content would be stored under
    pub fn blob_id(&self, file_path: &Path) -> anyhow::Result<ObjectId> {
        Blob::new(self.read_file(file_path)?).object_id()
    }

    /// Overwrite or create a file, creating parent directories as needed
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);
        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        write_atomically(&path, content)
    }

    /// Delete a file if present and prune the directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);
        if !path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        if let Some(parent) = path.parent() {
            prune_empty_dirs(parent, &self.path)?;
        }

        Ok(())
    }

    pub fn is_dir(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    /// Every file in the working tree, relative and sorted, skipping the repository directory
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.list_files_under(Path::new(""))
    }

    /// Files below `dir`, relative to the working tree root and sorted
    pub fn list_files_under(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(self.path.join(dir))
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Deletions first so that a file replaced by a directory (or the reverse) is
    /// out of the way before the writes land.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for file_path in migration.deletions() {
            self.remove_file(file_path)?;
        }

        for (file_path, content) in migration.writes() {
            self.write_file(file_path, content)?;
        }

        Ok(())
    }

    fn is_ignored(path: &Path) -> bool {
        path.components()
            .next()
            .is_some_and(|component| component.as_os_str() == REPOSITORY_DIR)
    }
}
