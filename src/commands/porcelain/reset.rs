use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{OrCorrupted, RepositoryResult};
use tracing::info;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub fn reset(&self, commit_prefix: &str) -> RepositoryResult<ObjectId> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_commit_prefix(commit_prefix)?;
        let target = self.load_commit(&target_oid)?;
        let head = self.current_commit()?;

        self.migrate(head.tree(), target.tree())?;

        let branch_name = self
            .refs()
            .current_branch()
            .or_corrupted(|| String::from("head does not name a branch"))?;
        self.refs().update_branch(&branch_name, &target_oid)?;

        info!(branch = %branch_name, oid = %target_oid, "reset branch");

        Ok(target_oid)
    }
}
