//! Content-addressed object store
//!
//! Objects are zlib-compressed and stored under `objects/<2 hex>/<38 hex>`, named by
//! the SHA-1 of their serialized bytes. Storing is idempotent: an object that is
//! already present is never rewritten. Every load re-hashes the bytes read from disk
//! and fails loudly on a mismatch.

use crate::artifacts::core::write_atomically;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::StoreError;
use anyhow::Context;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store raw file content as a blob and return its id
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    /// Read back the content of a blob
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.parse_object_as_blob(object_id)?.into_content())
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
        } else {
            let object_content = object.serialize()?;
            self.write_object(object_path, object_content)?;
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    /// Load the raw (decompressed) bytes of an object, verifying its id
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(StoreError::ObjectNotFound(object_id.clone()).into());
        }

        let object_content = self.read_object(object_path)?;

        let actual = ObjectId::digest(&object_content);
        if &actual != object_id {
            return Err(StoreError::CorruptObject {
                oid: object_id.clone(),
                actual,
            }
            .into());
        }

        Ok(object_content)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(object_id, ObjectType::Blob)?;

        Blob::deserialize(object_reader)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(object_id, ObjectType::Commit)?;

        Commit::deserialize(object_reader)
            .with_context(|| format!("Unable to parse commit {object_id}"))
    }

    /// Whether `object_id` names a commit; missing objects are simply not commits.
    pub fn is_commit(&self, object_id: &ObjectId) -> anyhow::Result<bool> {
        if !self.contains(object_id) {
            return Ok(false);
        }

        let mut object_reader = Cursor::new(self.load(object_id)?);
        let (object_type, _) = ObjectType::parse_object_header(&mut object_reader)?;

        Ok(object_type == ObjectType::Commit)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
        expected: ObjectType,
    ) -> anyhow::Result<impl BufRead> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_object_header(&mut object_reader)?;
        if object_type != expected {
            return Err(StoreError::WrongObjectType {
                oid: object_id.clone(),
                expected,
                actual: object_type,
            }
            .into());
        }

        let remaining = object_reader.get_ref().len() - object_reader.position() as usize;
        if remaining != size {
            anyhow::bail!("Object {object_id} declares {size} bytes but holds {remaining}");
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_content = Self::compress(object_content)?;

        write_atomically(&object_path, &object_content)
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}

/// Memoizes the parent edges of commits during graph traversals
#[derive(Debug, Default)]
pub struct CommitCache {
    slim_commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        object_id: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(slim_commit) = self.slim_commits.borrow().get(object_id) {
            return Ok(slim_commit.clone());
        }

        let slim_commit = database
            .parse_object_as_commit(object_id)?
            .to_slim(object_id.clone());
        self.slim_commits
            .borrow_mut()
            .insert(object_id.clone(), slim_commit.clone());

        Ok(slim_commit)
    }
}
