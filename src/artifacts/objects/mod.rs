//! Stored object types
//!
//! Everything the object store holds is an object identified by the SHA-1 of its
//! serialized bytes. There are two kinds:
//!
//! - **Blob**: raw file content
//! - **Commit**: a full snapshot (path → blob id table) plus message, timestamp and
//!   parent links
//!
//! Serialized form: `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
