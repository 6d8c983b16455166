//! Staging index
//!
//! Holds the changes pending for the next commit as two disjoint collections:
//! paths staged for addition (mapped to the blob id of their staged content) and
//! paths staged for removal. Staging a path on one side always clears it from the
//! other. The index is cleared after every commit, checkout, reset and merge.
//!
//! The on-disk layout is described in [`crate::artifacts::index`].

use crate::artifacts::core::write_atomically;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::staged_entry::{StagedEntry, parse_path, serialize_path};
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.sprig/index`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
    /// Whether the index has been modified since it was loaded
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index. Otherwise the header, the staged
    /// entries and the trailing checksum are read and verified.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let index_file = std::fs::File::open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        if index_file.metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(BufReader::new(index_file));
        let header = IndexHeader::parse(&reader.read(HEADER_SIZE)?)?;

        for _ in 0..header.additions_count {
            let oid_bytes = reader.read(OBJECT_ID_LENGTH / 2)?;
            let path_bytes = reader.read_until_nul()?;
            let entry = StagedEntry::parse(&oid_bytes, &path_bytes)?;
            self.additions.insert(entry.path, entry.oid);
        }
        for _ in 0..header.removals_count {
            let path_bytes = reader.read_until_nul()?;
            self.removals.insert(parse_path(&path_bytes)?);
        }

        reader.verify()?;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "loaded staging index"
        );
        Ok(())
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        self.write()
    }

    pub fn write(&mut self) -> anyhow::Result<()> {
        let mut writer = Checksum::new(Vec::new());
        let header = IndexHeader::for_counts(self.additions.len(), self.removals.len());
        writer.write(&header.serialize()?)?;

        for (path, oid) in &self.additions {
            let entry = StagedEntry::new(path.clone(), oid.clone());
            writer.write(&entry.serialize()?)?;
        }
        for path in &self.removals {
            writer.write(&serialize_path(path)?)?;
        }
        writer.write_checksum()?;

        write_atomically(&self.path, &writer.into_inner())?;
        self.changed = false;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "wrote staging index"
        );
        Ok(())
    }

    /// Stage `path` for addition with content `oid`, clearing any pending removal
    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        self.removals.remove(&path);
        self.additions.insert(path, oid);
        self.changed = true;
    }

    /// Drop a pending addition; returns whether there was one
    pub fn discard_addition(&mut self, path: &Path) -> bool {
        let discarded = self.additions.remove(path).is_some();
        self.changed |= discarded;
        discarded
    }

    /// Stage `path` for removal, clearing any pending addition
    pub fn stage_removal(&mut self, path: PathBuf) {
        self.additions.remove(&path);
        self.removals.insert(path);
        self.changed = true;
    }

    /// Drop a pending removal; returns whether there was one
    pub fn unstage_removal(&mut self, path: &Path) -> bool {
        let unstaged = self.removals.remove(path);
        self.changed |= unstaged;
        unstaged
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn addition(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }
}
