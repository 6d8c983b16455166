use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::RepositoryError;
use anyhow::Context;
use std::path::PathBuf;

/// Prefix of branch refs inside the repository directory
pub const REF_PREFIX: &str = "refs/heads/";

/// A validated branch name
///
/// Names may be hierarchical (`feature/login`); each component becomes a directory
/// under `refs/heads/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || re.is_match(&name) {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        Ok(Self(name))
    }

    /// Parse the target of a `ref: refs/heads/<name>` marker
    pub fn try_parse_ref_path(ref_path: &str) -> anyhow::Result<Self> {
        let name = ref_path
            .strip_prefix(REF_PREFIX)
            .with_context(|| format!("symbolic ref must start with '{REF_PREFIX}', got '{ref_path}'"))?;

        Self::try_parse(name.to_string())
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// `refs/heads/<name>`
    pub fn to_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }

    /// Location of the ref file relative to `refs/heads/`
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
