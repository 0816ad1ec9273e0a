use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::commit::{Commit, CommitTree};
use crate::errors::{OrCorrupted, RepositoryError, RepositoryResult};
use std::path::Path;
use tracing::{debug, info};

impl Repository {
    /// Restore a file to its version in the current commit
    pub fn checkout_file(&self, file_path: &Path) -> RepositoryResult<()> {
        self.ensure_initialized()?;

        let head = self.current_commit()?;
        self.restore_file(&head, file_path)
    }

    /// Restore a file to its version in the commit identified by `commit_prefix`;
    /// head does not move
    pub fn checkout_commit_file(
        &self,
        commit_prefix: &str,
        file_path: &Path,
    ) -> RepositoryResult<()> {
        self.ensure_initialized()?;

        let commit_oid = self.database().resolve_commit_prefix(commit_prefix)?;
        let commit = self.load_commit(&commit_oid)?;
        self.restore_file(&commit, file_path)
    }

    /// Replace the working tree with the tip of `branch` and make it the current branch
    pub fn checkout_branch(&self, branch: &str) -> RepositoryResult<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch(branch.to_string()))?;
        if !self.refs().branch_exists(&branch_name) {
            return Err(RepositoryError::NoSuchBranch(branch.to_string()));
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(RepositoryError::AlreadyOnBranch);
        }

        let target_oid = self
            .refs()
            .read_branch(&branch_name)
            .or_corrupted(|| format!("branch {branch_name} is unreadable"))?
            .ok_or_else(|| RepositoryError::Corrupted(format!("branch {branch_name} is empty")))?;
        let head = self.current_commit()?;
        let target = self.load_commit(&target_oid)?;

        self.migrate(head.tree(), target.tree())?;
        self.refs().move_head(&branch_name)?;

        info!(branch = %branch_name, oid = %target_oid, "switched branch");

        Ok(())
    }

    /// Move the working tree from `current` to `target` and clear the staging area.
    ///
    /// Nothing is written unless the untracked-file guard passes and every blob of
    /// `target` could be loaded.
    pub(crate) fn migrate(
        &self,
        current: &CommitTree,
        target: &CommitTree,
    ) -> RepositoryResult<()> {
        Migration::check_untracked(self.workspace(), current, target)?;
        let migration = Migration::plan(self.database(), current, target)?;

        debug!(
            added = migration.actions_of(ActionType::Add).len(),
            modified = migration.actions_of(ActionType::Modify).len(),
            deleted = migration.actions_of(ActionType::Delete).len(),
            "applying migration"
        );
        self.workspace().apply_migration(&migration)?;

        let mut staging = self.staging();
        staging.clear();
        staging.write_updates()?;

        Ok(())
    }

    fn restore_file(&self, commit: &Commit, file_path: &Path) -> RepositoryResult<()> {
        let not_in_commit = || RepositoryError::FileNotFoundInCommit(file_path.to_path_buf());

        let path = self
            .workspace()
            .normalize(file_path)
            .map_err(|_| not_in_commit())?;
        let blob_oid = commit.tracks(&path).ok_or_else(not_in_commit)?;

        let blob = self
            .database()
            .load_blob(blob_oid)
            .or_corrupted(|| format!("blob {blob_oid} for {} is unreadable", path.display()))?;
        self.workspace().write_file(&path, blob.content())?;

        debug!(path = %path.display(), commit = %commit.oid(), "restored file");

        Ok(())
    }
}
