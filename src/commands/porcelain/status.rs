use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let status_info = Status::new(self).initialize()?;
        write!(self.writer(), "{status_info}")?;

        Ok(())
    }
}
