//! Merge engine
//!
//! - `split_point`: lowest common ancestor search over both parent edges
//! - `resolution`: the three-way decision table applied to every path
//! - `conflict`: content written for conflicted files

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

pub mod conflict;
pub mod resolution;
pub mod split_point;

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already contained in the current one; nothing changed
    AlreadyAncestor,
    /// The current branch moved forward to the given tip without a new commit
    FastForward(ObjectId),
    /// A merge commit was created; `conflicted` lists the paths left with markers
    Merged {
        commit: ObjectId,
        conflicted: Vec<PathBuf>,
    },
}
