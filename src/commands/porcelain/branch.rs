use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, RepositoryResult};

impl Repository {
    /// Create a branch at the current commit; head stays where it is
    pub fn branch(&self, name: &str) -> RepositoryResult<ObjectId> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.current_commit_id()?;
        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(head_oid)
    }

    /// Delete a branch reference; its commits are kept
    pub fn rm_branch(&self, name: &str) -> RepositoryResult<ObjectId> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(name.to_string()))?;
        self.refs().delete_branch(&branch_name)
    }
}
