//! User-facing commands
//!
//! Each command is an inherent method on `Repository`, writing its output to the
//! repository's writer.
//!
//! ## Commands
//!
//! - `init`: Create the repository with its root commit
//! - `add`, `rm`: Stage additions and removals
//! - `commit`: Record the staged changes
//! - `log`, `global-log`, `find`: Browse history
//! - `status`: Show branches, staged changes and working tree state
//! - `branch`, `rm-branch`: Create and delete branch pointers
//! - `checkout`: Switch branches or restore files
//! - `reset`: Move the current branch to another commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
