use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::errors::{OrCorrupted, RepositoryError, RepositoryResult};
use tracing::info;

impl Repository {
    /// Fold the staging area into a new commit on top of the current branch
    pub fn commit(&self, message: &str) -> RepositoryResult<Commit> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage);
        }
        if self.staging().is_empty() {
            return Err(RepositoryError::NothingToCommit);
        }

        let branch_name = self
            .refs()
            .current_branch()
            .or_corrupted(|| String::from("head does not name a branch"))?;
        let parent = self.current_commit()?;
        let tree = self.staging().apply_to(parent.tree());

        let commit = Commit::new(
            Parents::Normal(parent.oid().clone()),
            tree,
            self.config().now(),
            message.to_string(),
        )?;
        self.database().store(&commit)?;

        {
            let mut staging = self.staging();
            staging.clear();
            staging.write_updates()?;
        }
        self.refs().update_branch(&branch_name, commit.oid())?;

        info!(
            branch = %branch_name,
            oid = %commit.oid(),
            files = commit.tree().len(),
            "created commit"
        );

        Ok(commit)
    }
}
