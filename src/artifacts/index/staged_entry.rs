use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};

/// A path staged for addition together with the blob id of its staged content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StagedEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

impl StagedEntry {
    pub(crate) fn parse(oid_bytes: &[u8], path_bytes: &[u8]) -> anyhow::Result<Self> {
        let mut oid_reader = std::io::Cursor::new(oid_bytes);
        let oid = ObjectId::read_h40_from(&mut oid_reader)?;

        Ok(StagedEntry {
            path: parse_path(path_bytes)?,
            oid,
        })
    }
}

impl Packable for StagedEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        self.oid.write_h40_to(&mut bytes)?;
        bytes.extend_from_slice(&serialize_path(&self.path)?);

        Ok(Bytes::from(bytes))
    }
}

/// NUL-terminated UTF-8 path as stored in the staging index
pub(crate) fn serialize_path(path: &Path) -> anyhow::Result<Bytes> {
    let path = path
        .to_str()
        .with_context(|| format!("Path {} is not valid UTF-8", path.display()))?;
    if path.contains('\0') {
        anyhow::bail!("Path {path:?} contains a NUL byte");
    }

    let mut bytes = Vec::with_capacity(path.len() + 1);
    bytes.extend_from_slice(path.as_bytes());
    bytes.push(0);

    Ok(Bytes::from(bytes))
}

pub(crate) fn parse_path(bytes: &[u8]) -> anyhow::Result<PathBuf> {
    let path = std::str::from_utf8(bytes).context("Invalid UTF-8 in index entry path")?;

    Ok(PathBuf::from(path))
}
