//! Commit object
//!
//! Commits are immutable snapshots of the whole tracked file set. They contain:
//! - An optional parent commit id (absent only for the root commit)
//! - An optional merge-parent id (set only on merge commits)
//! - A timestamp with timezone
//! - A file table mapping tracked path → blob id (a full snapshot, not a delta)
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge <merge-parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! The id is a pure function of these fields: the file table is kept sorted by path
//! so that two commits with identical fields always serialize to identical bytes.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Message of the root commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "SPRIG_COMMIT_DATE";

/// Path → blob id table of a commit
pub type FileTable = BTreeMap<PathBuf, ObjectId>;

/// Read the commit timestamp from `SPRIG_COMMIT_DATE`, falling back to the current time.
///
/// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`. An unparsable value is ignored.
pub fn load_timestamp_from_env() -> DateTime<FixedOffset> {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

/// Slim representation of a commit
///
/// Contains only what graph traversal needs: the commit id and its parent edges
/// (first parent followed by the merge parent, if any).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    files: FileTable,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        files: FileTable,
        message: String,
    ) -> Self {
        Commit {
            parent,
            merge_parent,
            timestamp,
            files,
            message,
        }
    }

    /// The parentless commit every repository starts from
    pub fn root() -> Self {
        let epoch = DateTime::from_timestamp(0, 0)
            .unwrap_or_default()
            .fixed_offset();

        Commit::new(
            None,
            None,
            epoch,
            FileTable::new(),
            ROOT_COMMIT_MESSAGE.to_string(),
        )
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Both parent edges, first parent first
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.merge_parent.iter())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }

    pub fn file_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Timestamp rendered like `Thu Jan 01 00:00:00 1970 +0000`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents().cloned().collect(),
        }
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp line")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: bad timestamp seconds")?;

        let (sign, digits) = match timezone.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => anyhow::bail!("Invalid commit object: bad timezone {timezone}"),
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Invalid commit object: bad timezone {timezone}");
        }
        let hours = digits[..2].parse::<i32>()?;
        let minutes = digits[2..].parse::<i32>()?;
        let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .context("Invalid commit object: timezone out of range")?;

        Ok(DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?
            .with_timezone(&offset))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge {merge_parent}"));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.files {
            let path = path
                .to_str()
                .with_context(|| format!("Path {} is not valid UTF-8", path.display()))?;
            if path.contains(['\n', '\r']) {
                anyhow::bail!("Path {path:?} contains a line break");
            }
            lines.push(format!("file {oid} {path}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(frame(self.object_type(), lines.join("\n").as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut files = FileTable::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(Self::parse_timestamp(value)?),
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed file line")?;
                    files.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {key}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Self::new(
            parent,
            merge_parent,
            timestamp,
            files,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
