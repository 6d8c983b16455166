//! Core utilities shared by the repository areas
//!
//! Every persisted file (objects, refs, the staging index, working-tree files) is
//! replaced through a temporary sibling and a `rename`, so a reader never observes
//! a half-written file.

use anyhow::Context;
use fake::rand;
use std::io::Write;
use std::path::Path;

fn generate_temp_name() -> String {
    format!("tmp-{}", rand::random::<u32>())
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_atomically(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("Invalid file path {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Unable to create directory {}", parent.display()))?;

    let temp_path = parent.join(generate_temp_name());
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Unable to open file {}", temp_path.display()))?;

    file.write_all(data)
        .with_context(|| format!("Unable to write file {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Unable to rename file to {}", path.display()))?;

    Ok(())
}

/// Remove empty directories from `dir` upwards, stopping at `root`.
pub fn prune_empty_dirs(dir: &Path, root: &Path) -> anyhow::Result<()> {
    if dir != root
        && dir.starts_with(root)
        && dir.is_dir()
        && dir.read_dir()?.next().is_none()
    {
        std::fs::remove_dir(dir)
            .with_context(|| format!("failed to remove empty directory at {:?}", dir))?;

        if let Some(parent) = dir.parent() {
            prune_empty_dirs(parent, root)?;
        }
    }

    Ok(())
}
