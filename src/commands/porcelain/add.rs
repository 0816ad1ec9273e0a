use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::is_trackable_path;
use crate::errors::{RepositoryError, RepositoryResult};
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Store the file's current content and stage it for the next commit.
    ///
    /// Adding content identical to the current commit's version unstages the file
    /// (including a pending removal).
    pub fn add(&self, file_path: &Path) -> RepositoryResult<()> {
        self.ensure_initialized()?;

        let path = self.workspace().normalize(file_path)?;
        if !self.workspace().is_file(&path) {
            return Err(RepositoryError::FileNotFound(file_path.to_path_buf()));
        }
        if !is_trackable_path(&path) {
            return Err(RepositoryError::UntrackablePath(file_path.to_path_buf()));
        }

        let head = self.current_commit()?;
        let tracked_oid = head.tracks(&path).cloned();

        let blob = self.workspace().parse_blob(&path)?;
        let blob_oid = self.database().store(&blob)?;
        debug!(path = %path.display(), oid = %blob_oid, "stored file content");

        let mut staging = self.staging();
        staging.stage_add(path, blob_oid, tracked_oid.as_ref());
        staging.write_updates()?;

        Ok(())
    }
}
