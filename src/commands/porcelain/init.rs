use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::config::DEFAULT_BRANCH;
use crate::errors::{RepositoryError, RepositoryResult};
use anyhow::Context;
use std::fs;
use tracing::info;

impl Repository {
    /// Create `.twig` with the root commit checked out on the default branch
    pub fn init(&self) -> RepositoryResult<Commit> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized);
        }

        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create .twig/objects/blobs directory")?;
        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create .twig/objects/commits directory")?;
        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .twig/refs/branches directory")?;

        let root = Commit::root()?;
        self.database().store(&root)?;

        {
            let mut staging = self.staging();
            staging.clear();
            staging.write_updates()?;
        }

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().update_branch(&default_branch, root.oid())?;
        self.refs().move_head(&default_branch)?;

        info!(path = %self.path().display(), root = %root.oid(), "initialized repository");

        Ok(root)
    }
}
