//! Working tree status
//!
//! Compares the working tree against the staging index and the HEAD commit.
//!
//! - `file_change`: kinds of unstaged changes
//! - `status_info`: gathering and rendering of the five status sections

pub mod file_change;
pub mod status_info;
