//! Working-tree migration between commits
//!
//! Used by branch checkout, reset and fast-forward merges. Untracked files that a
//! migration would overwrite are detected before any change is made.

pub mod migration;
