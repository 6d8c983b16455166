use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::fmt;

/// One commit as printed by `log` and `global-log`
///
/// ```text
/// ===
/// commit <oid>
/// Merge: <parent> <merge-parent>
/// Date: Thu Jan 01 00:00:00 1970 +0000
/// <message>
///
/// ```
///
/// The `Merge:` line only appears for merge commits and shows abbreviated ids.
#[derive(Debug, new)]
pub struct LogEntry<'c> {
    oid: &'c ObjectId,
    commit: &'c Commit,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.oid)?;
        if let (Some(parent), Some(merge_parent)) =
            (self.commit.parent(), self.commit.merge_parent())
        {
            writeln!(
                f,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::FileTable;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_commit_entry() {
        let root = Commit::root();
        let oid = ObjectId::digest(b"root");

        assert_eq!(
            LogEntry::new(&oid, &root).to_string(),
            format!("===\ncommit {oid}\nDate: Thu Jan 01 00:00:00 1970 +0000\ninitial commit\n\n")
        );
    }

    #[test]
    fn merge_commit_entry_lists_both_parents() {
        let parent = ObjectId::digest(b"parent");
        let given = ObjectId::digest(b"given");
        let merge = Commit::new(
            Some(parent.clone()),
            Some(given.clone()),
            Commit::root().timestamp(),
            FileTable::new(),
            "Merged feature into master.".to_string(),
        );
        let oid = ObjectId::digest(b"merge");

        let entry = LogEntry::new(&oid, &merge).to_string();

        assert!(entry.contains(&format!(
            "\nMerge: {} {}\n",
            &parent.as_ref()[..7],
            &given.as_ref()[..7]
        )));
    }
}
