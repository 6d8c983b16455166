//! Commit history traversal
//!
//! - `rev_list`: first-parent walks for `log`, and breadth-first reachability over
//!   both parent edges for `find` and abbreviated id resolution
//! - `log_entry`: rendering of one commit in log output

pub mod log_entry;
pub mod rev_list;
