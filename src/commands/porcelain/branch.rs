use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create `name` pointing at the HEAD commit, without switching to it
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)
    }

    /// Delete the pointer `name`; its commits stay in the store
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        let (branch_name, _) = self.refs().resolve_branch(name)?;
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::CannotRemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
