use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusReport;
use crate::errors::{OrCorrupted, RepositoryResult};

impl Repository {
    pub fn status(&self) -> RepositoryResult<StatusReport> {
        self.ensure_initialized()?;

        let current_branch = self
            .refs()
            .current_branch()
            .or_corrupted(|| String::from("head does not name a branch"))?;
        let branches = self.refs().list_branches()?;
        let head = self.current_commit()?;

        let report = StatusReport::inspect(
            current_branch,
            branches,
            head.tree(),
            &self.staging(),
            self.workspace(),
        )?;

        Ok(report)
    }
}
