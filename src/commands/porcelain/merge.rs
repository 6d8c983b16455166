use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::{Migration, untracked_conflicts};
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::resolution::{Resolution, resolve_all};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::io::Write;
use std::path::PathBuf;

/// A merge step whose blob contents have been loaded
enum MergeAction {
    Write(PathBuf, Bytes, ObjectId),
    Delete(PathBuf),
    Conflict(PathBuf, Bytes),
}

impl Repository {
    /// Merge branch `name` into the current branch
    pub fn merge(&self, name: &str) -> anyhow::Result<MergeOutcome> {
        let (given_branch, given_oid) = self.refs().resolve_branch(name)?;
        if !self.index().is_empty() {
            return Err(RepositoryError::DirtyWorkingState.into());
        }

        let current_branch = self.refs().current_branch()?;
        if current_branch == given_branch {
            return Err(RepositoryError::SelfMerge.into());
        }

        let (current_oid, current_commit) = self.head_commit()?;
        let given_commit = self.database().parse_object_as_commit(&given_oid)?;

        let conflicts = untracked_conflicts(self, current_commit.files(), given_commit.files())?;
        if !conflicts.is_empty() {
            return Err(RepositoryError::UncommittedUntrackedConflict(conflicts).into());
        }

        let cache = CommitCache::new();
        let finder =
            SplitPointFinder::new(|oid: &ObjectId| cache.get_or_load_slim_commit(self.database(), oid));
        let split_oid = finder
            .find_split_point(&current_oid, &given_oid)?
            .ok_or_else(|| {
                anyhow::anyhow!("no common ancestor between {current_oid} and {given_oid}")
            })?;

        if split_oid == given_oid {
            writeln!(self.writer(), "Given branch is an ancestor of the current branch.")?;
            return Ok(MergeOutcome::AlreadyAncestor);
        }

        if split_oid == current_oid {
            Migration::new(self, current_commit.files(), given_commit.files()).apply_changes()?;
            self.refs().update_head(&given_oid)?;
            self.clear_index()?;

            tracing::info!(oid = %given_oid, branch = %given_branch, "fast-forwarded");
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForward(given_oid));
        }

        let split_commit = self.database().parse_object_as_commit(&split_oid)?;
        let actions = self.plan_merge(&split_commit, &current_commit, &given_commit)?;
        let conflicted = self.apply_merge(actions)?;

        let message = format!("Merged {given_branch} into {current_branch}.");
        let commit_oid = self.write_commit(&message, Some(given_oid))?;

        if !conflicted.is_empty() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_oid,
            conflicted,
        })
    }

    /// Resolve every path and load the contents needed, before touching the working tree
    fn plan_merge(
        &self,
        split: &Commit,
        current: &Commit,
        given: &Commit,
    ) -> anyhow::Result<Vec<MergeAction>> {
        let load = |oid: Option<&ObjectId>| -> anyhow::Result<Option<Bytes>> {
            oid.map(|oid| self.database().get(oid)).transpose()
        };

        let mut actions = Vec::new();
        for (path, resolution) in resolve_all(split.files(), current.files(), given.files()) {
            match resolution {
                Resolution::KeepCurrent => {}
                Resolution::TakeGiven(oid) => {
                    let content = self.database().get(&oid)?;
                    actions.push(MergeAction::Write(path, content, oid));
                }
                Resolution::Remove => actions.push(MergeAction::Delete(path)),
                Resolution::Conflict { current, given } => {
                    let current = load(current.as_ref())?;
                    let given = load(given.as_ref())?;
                    let content = render_conflict(current.as_deref(), given.as_deref());
                    actions.push(MergeAction::Conflict(path, content));
                }
            }
        }

        Ok(actions)
    }

    /// Apply the planned actions to the working tree and stage them; returns the conflicted paths
    fn apply_merge(&self, actions: Vec<MergeAction>) -> anyhow::Result<Vec<PathBuf>> {
        let mut conflicted = Vec::new();
        let mut index = self.index();

        for action in actions {
            match action {
                MergeAction::Write(path, content, oid) => {
                    self.workspace().write_file(&path, &content)?;
                    index.stage_addition(path, oid);
                }
                MergeAction::Delete(path) => {
                    self.workspace().remove_file(&path)?;
                    index.stage_removal(path);
                }
                MergeAction::Conflict(path, content) => {
                    let oid = self.database().put(content.clone())?;
                    self.workspace().write_file(&path, &content)?;

                    tracing::warn!(path = %path.display(), "merge conflict");
                    index.stage_addition(path.clone(), oid);
                    conflicted.push(path);
                }
            }
        }

        index.write_updates()?;
        Ok(conflicted)
    }
}

