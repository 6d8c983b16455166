//! Staging index file format
//!
//! The staging index holds the changes pending for the next commit: paths staged
//! for addition (with the blob id of their staged content) and paths staged for
//! removal.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "SIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Addition count (4 bytes)
//!   - Removal count (4 bytes)
//!
//! Additions:
//!   - Blob id (20 bytes) followed by the NUL-terminated path
//!
//! Removals:
//!   - NUL-terminated path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_header;
pub mod staged_entry;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying staging index files
pub const SIGNATURE: &str = "SIDX";

/// Staging index file format version
pub const VERSION: u32 = 1;
