use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::{RevList, reachable_commits};
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// History of HEAD along first parents, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let head_oid = self.refs().read_head()?;

        for entry in RevList::new(self.database(), head_oid) {
            let (oid, commit) = entry?;
            write!(self.writer(), "{}", LogEntry::new(&oid, &commit))?;
        }

        Ok(())
    }

    /// First-parent history of every branch in name order, each commit shown once
    pub fn global_log(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();

        for (_, tip) in self.refs().branch_tips()? {
            for entry in RevList::new(self.database(), tip) {
                let (oid, commit) = entry?;
                if !seen.insert(oid.clone()) {
                    break;
                }
                write!(self.writer(), "{}", LogEntry::new(&oid, &commit))?;
            }
        }

        Ok(())
    }

    /// Ids of every reachable commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let tips = self
            .refs()
            .branch_tips()?
            .into_iter()
            .map(|(_, oid)| oid);

        let mut found = false;
        for oid in reachable_commits(self.database(), tips)? {
            let commit = self.database().parse_object_as_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if !found {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }

        Ok(())
    }
}
