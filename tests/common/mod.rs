#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fixed commit date so that runs produce the same commit ids
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";
