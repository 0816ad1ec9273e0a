use crate::areas::repository::Repository;
use crate::errors::RepositoryResult;
use std::path::Path;

impl Repository {
    /// Unstage a file and, if the current commit tracks it, stage its removal and
    /// delete it from the working tree
    pub fn rm(&self, file_path: &Path) -> RepositoryResult<()> {
        self.ensure_initialized()?;

        let path = self.workspace().normalize(file_path)?;
        let tracked = self.current_commit()?.tracks(&path).is_some();

        let mut staging = self.staging();
        staging.stage_remove(&path, tracked)?;

        if tracked {
            self.workspace().remove_file(&path)?;
        }
        staging.write_updates()?;

        Ok(())
    }
}
