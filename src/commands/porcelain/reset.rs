use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to `revision` and check that commit out
    pub fn reset(&self, revision: &str) -> anyhow::Result<()> {
        let target_oid = Revision::try_parse(revision)?.resolve(self)?;

        let (_, current_commit) = self.head_commit()?;
        let target_commit = self.database().parse_object_as_commit(&target_oid)?;

        Migration::new(self, current_commit.files(), target_commit.files()).apply_changes()?;

        self.refs().update_head(&target_oid)?;
        self.clear_index()?;

        tracing::info!(oid = %target_oid, "reset current branch");
        Ok(())
    }
}
