//! Branch names and revision arguments

pub mod branch_name;
pub mod revision;

/// Branch created by `init` and checked out in a fresh repository
pub const DEFAULT_BRANCH: &str = "master";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
