use crate::areas::database::{CommitCache, Database};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::{HashSet, VecDeque};

/// First-parent history starting at `start`, child before parent
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: ObjectId,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: Some(self.start),
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // a broken link ends the walk with the error
            Err(err) => Some(Err(err)),
        }
    }
}

/// Every commit reachable from `tips` through either parent edge, each listed once
/// in breadth-first order.
pub fn reachable_commits(
    database: &Database,
    tips: impl IntoIterator<Item = ObjectId>,
) -> anyhow::Result<Vec<ObjectId>> {
    let cache = CommitCache::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut reachable = Vec::new();

    for tip in tips {
        if visited.insert(tip.clone()) {
            queue.push_back(tip);
        }
    }

    while let Some(oid) = queue.pop_front() {
        let slim_commit = cache.get_or_load_slim_commit(database, &oid)?;
        for parent in slim_commit.parents {
            if visited.insert(parent.clone()) {
                queue.push_back(parent);
            }
        }
        reachable.push(oid);
    }

    Ok(reachable)
}
