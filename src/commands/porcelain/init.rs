use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .sprig/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .sprig/refs/heads directory")?;

        let root_oid = self
            .database()
            .store(&Commit::root())
            .context("Failed to store the initial commit")?;

        let master = BranchName::default_branch();
        self.refs()
            .update_branch(&master, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&master)
            .context("Failed to create initial HEAD reference")?;

        self.index()
            .write()
            .context("Failed to create .sprig/index file")?;

        tracing::info!(root = %root_oid, "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty sprig repository in {}",
            self.repository_path().display()
        )?;

        Ok(())
    }
}
