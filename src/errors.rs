//! Structured failure kinds reported by repository commands
//!
//! Commands distinguish three families of failures:
//!
//! - **user errors**: the request cannot be honoured (nothing staged, unknown branch,
//!   untracked file in the way, ...). They are detected before anything is written,
//!   so the repository is left untouched.
//! - **precondition failures**: the repository is missing or a short commit id is
//!   ambiguous. Also reported before any mutation.
//! - **corruption / internal failures**: a stored record cannot be decoded, an object
//!   referenced by a commit is missing, or the file system failed underneath us.

use std::path::PathBuf;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("File does not exist.")]
    FileNotFound(PathBuf),

    #[error("File name {0:?} cannot be tracked.")]
    UntrackablePath(PathBuf),

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No reason to remove the file.")]
    NoReasonToRemove(PathBuf),

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("No commit with that id exists.")]
    CommitNotFound(String),

    #[error("Commit id {prefix} is ambiguous; candidates are: {}", .candidates.join(", "))]
    AmbiguousCommitId {
        prefix: String,
        candidates: Vec<String>,
    },

    #[error("File does not exist in that commit.")]
    FileNotFoundInCommit(PathBuf),

    #[error("No such branch exists.")]
    NoSuchBranch(String),

    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay(Vec<PathBuf>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("repository corrupted: {0}")]
    Corrupted(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RepositoryError {
    /// Whether the failure is a recoverable user or precondition error
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Corrupted(_) | Self::Internal(_))
    }
}

/// Turn a storage failure into a [`RepositoryError::Corrupted`]
///
/// Used where the missing or unreadable record was referenced by repository state
/// (a branch, a commit tree), so its absence breaks a repository invariant.
pub trait OrCorrupted<T> {
    fn or_corrupted<F>(self, describe: F) -> RepositoryResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> OrCorrupted<T> for anyhow::Result<T> {
    fn or_corrupted<F>(self, describe: F) -> RepositoryResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| RepositoryError::Corrupted(format!("{}: {err:#}", describe())))
    }
}
