use crate::areas::repository::Repository;
use crate::artifacts::log::history::{History, all_commits};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{OrCorrupted, RepositoryError, RepositoryResult};

impl Repository {
    /// First-parent walk starting at `from`
    pub fn history(&self, from: ObjectId) -> History<'_> {
        History::new(self.database(), Some(from))
    }

    /// The current branch's history, newest first, down to the root commit
    pub fn log(&self) -> RepositoryResult<Vec<Commit>> {
        self.ensure_initialized()?;

        let head_oid = self.current_commit_id()?;
        self.history(head_oid.clone())
            .collect::<anyhow::Result<Vec<_>>>()
            .or_corrupted(|| format!("history of {head_oid} is unreadable"))
    }

    /// Every commit ever made, newest first
    pub fn global_log(&self) -> RepositoryResult<Vec<Commit>> {
        self.ensure_initialized()?;

        all_commits(self.database()).or_corrupted(|| String::from("commit store is unreadable"))
    }

    /// IDs of the commits whose message is exactly `message`, sorted
    pub fn find(&self, message: &str) -> RepositoryResult<Vec<ObjectId>> {
        let mut matches = self
            .global_log()?
            .into_iter()
            .filter(|commit| commit.message() == message)
            .map(|commit| commit.oid().clone())
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage);
        }
        matches.sort();

        Ok(matches)
    }
}
