//! sprig: a small local version-control engine
//!
//! - `areas`: the persisted parts of a repository (object store, staging index, refs,
//!   working tree) and the `Repository` handle tying them together
//! - `artifacts`: data structures and algorithms (objects, branch names, history
//!   traversal, checkout planning, merge resolution, status)
//! - `commands`: one `Repository` method per user-facing operation
//! - `errors`: user-input and object-store error types

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
