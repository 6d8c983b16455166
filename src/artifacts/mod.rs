//! Data structures and algorithms
//!
//! - `branch`: branch names and revision arguments
//! - `checkout`: working-tree migration between commits
//! - `core`: shared file-system helpers
//! - `index`: staging index file format
//! - `log`: commit history traversal and log rendering
//! - `merge`: split point search, three-way resolution and conflict rendering
//! - `objects`: blob and commit objects and their ids
//! - `status`: working tree status

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
