use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::reachable_commits;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

/// A commit named on the command line by its full id or an abbreviation of it
///
/// - A full 40-character id resolves when it names a commit in the object store
/// - A shorter hexadecimal prefix resolves when exactly one commit reachable from
///   some branch starts with it
///
/// Anything else (ambiguous, unknown, empty, or not hexadecimal) is an
/// `UnknownRevision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Self> {
        let revision = revision.trim();

        if revision.is_empty()
            || revision.len() > OBJECT_ID_LENGTH
            || !revision.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(RepositoryError::UnknownRevision(revision.to_string()).into());
        }

        Ok(Self(revision.to_ascii_lowercase()))
    }

    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        let unknown = || RepositoryError::UnknownRevision(self.0.clone());

        if self.0.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(self.0.clone())?;
            return if repository.database().is_commit(&oid)? {
                Ok(oid)
            } else {
                Err(unknown().into())
            };
        }

        let tips = repository
            .refs()
            .branch_tips()?
            .into_iter()
            .map(|(_, oid)| oid);
        let mut candidates = reachable_commits(repository.database(), tips)?
            .into_iter()
            .filter(|oid| oid.has_prefix(&self.0));

        match (candidates.next(), candidates.next()) {
            (Some(oid), None) => Ok(oid),
            (Some(first), Some(second)) => {
                tracing::debug!(prefix = %self.0, %first, %second, "ambiguous abbreviated id");
                Err(unknown().into())
            }
            (None, _) => Err(unknown().into()),
        }
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
