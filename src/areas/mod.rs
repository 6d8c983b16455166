//! Persisted repository areas
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branch pointers and the HEAD marker
//! - `repository`: the handle tying the areas to one working tree
//! - `workspace`: working-tree file operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
