use crate::artifacts::branch::{BRANCH_REF_PREFIX, INVALID_BRANCH_NAME_REGEX};
use crate::errors::{RepositoryError, RepositoryResult};
use anyhow::Context;
use derive_new::new;

/// Target of a symbolic reference, relative to the repository directory
/// (e.g. `refs/branches/master`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn for_branch(branch_name: &BranchName) -> Self {
        SymRefName(format!("{BRANCH_REF_PREFIX}{branch_name}"))
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> RepositoryResult<Self> {
        if name.is_empty() {
            return Err(RepositoryError::InvalidBranchName(name));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }

    pub fn try_parse_sym_ref_name(sym_ref_name: &SymRefName) -> anyhow::Result<Self> {
        let name = sym_ref_name
            .0
            .strip_prefix(BRANCH_REF_PREFIX)
            .with_context(|| {
                format!(
                    "symbolic ref name must start with '{BRANCH_REF_PREFIX}', got '{sym_ref_name}'"
                )
            })?;

        Self::try_parse(name.to_string()).map_err(anyhow::Error::from)
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
