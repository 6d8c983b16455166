//! Command implementations
//!
//! - `porcelain`: the operations the `sprig` binary exposes (add, commit, merge, etc.)

pub mod porcelain;
