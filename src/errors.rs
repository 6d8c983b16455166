//! Error taxonomy
//!
//! Two families of errors flow through the crate, both wrapped in `anyhow::Error`:
//!
//! - [`RepositoryError`]: expected user-input conditions. They are raised before any
//!   state is mutated and the shell prints their message verbatim.
//! - [`StoreError`]: object store integrity failures. They are fatal and are never
//!   papered over with empty content.
//!
//! Callers recover the concrete variant with `err.downcast_ref::<RepositoryError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Not in an initialized sprig directory.")]
    NotInitialized,
    #[error("A sprig version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileNotFound(PathBuf),
    #[error("No reason to remove the file.")]
    NothingToRemove(PathBuf),
    #[error("No changes added to the commit.")]
    NoStagedChanges,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No commit with that id exists.")]
    UnknownRevision(String),
    #[error("A branch with that name does not exist.")]
    NoSuchBranch(String),
    #[error("A branch with that name already exists.")]
    BranchExists(String),
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("File does not exist in that commit.")]
    PathNotInCommit(PathBuf),
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UncommittedUntrackedConflict(Vec<PathBuf>),
    #[error("You have uncommitted changes.")]
    DirtyWorkingState,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("object {0} is missing from the object store")]
    ObjectNotFound(ObjectId),
    #[error("object {oid} is corrupt: its content hashes to {actual}")]
    CorruptObject { oid: ObjectId, actual: ObjectId },
    #[error("object {oid} is a {actual}, expected a {expected}")]
    WrongObjectType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },
}

/// Returns the user-facing error carried by `err`, if any.
pub fn as_repository_error(err: &anyhow::Error) -> Option<&RepositoryError> {
    err.downcast_ref::<RepositoryError>()
}
