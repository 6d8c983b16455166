//! Three-way file resolution
//!
//! Every path tracked by the split point, the current tip or the given tip is
//! classified from its blob id on each side (`None` when the side does not track
//! it):
//!
//! | split | current | given | outcome |
//! |-------|---------|-------|---------|
//! | any   | x       | x     | keep current (unchanged, or changed identically) |
//! | s     | s       | g     | take given (`g` may be absent: delete) |
//! | s     | c       | s     | keep current |
//! | any   | c       | g     | conflict (both changed differently) |
//!
//! The rows are checked top to bottom, so "both sides absent" and "only the
//! current side changed" fall into the keep rows, while a modification on one
//! side against a deletion on the other is a conflict.

use crate::artifacts::objects::commit::FileTable;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The current side already holds the merged result
    KeepCurrent,
    /// Write the given side's content and stage it
    TakeGiven(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Both sides changed the file differently
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

pub fn resolve(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Resolution {
    if current == given {
        Resolution::KeepCurrent
    } else if split == current {
        match given {
            Some(given) => Resolution::TakeGiven(given.clone()),
            None => Resolution::Remove,
        }
    } else if split == given {
        Resolution::KeepCurrent
    } else {
        Resolution::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        }
    }
}

/// Resolve every path of the three file tables, in path order
pub fn resolve_all(
    split: &FileTable,
    current: &FileTable,
    given: &FileTable,
) -> Vec<(PathBuf, Resolution)> {
    let paths = split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .map(|path| {
            let resolution = resolve(split.get(path), current.get(path), given.get(path));
            tracing::debug!(path = %path.display(), ?resolution, "resolved merge path");
            (path.clone(), resolution)
        })
        .collect()
}
