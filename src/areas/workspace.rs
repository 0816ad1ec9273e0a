use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::config::REPOSITORY_DIR;
use crate::errors::{RepositoryError, RepositoryResult};
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file below the root, relative to it, excluding the repository
    /// directory
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR);

        for entry in walker {
            let entry = entry.context("Unable to walk the working tree")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(&self.path)
                .with_context(|| format!("{:?} is outside the working tree", entry.path()))?;
            files.insert(relative_path.to_path_buf());
        }

        Ok(files)
    }

    /// Turn a user-supplied path into one relative to the root.
    ///
    /// Relative paths are taken from the root. `.` and `..` are resolved lexically;
    /// paths escaping the root or pointing into the repository directory are rejected
    /// as missing files.
    pub fn normalize(&self, user_path: &Path) -> RepositoryResult<PathBuf> {
        let not_found = || RepositoryError::FileNotFound(user_path.to_path_buf());

        let relative_path = if user_path.is_absolute() {
            user_path.strip_prefix(&self.path).map_err(|_| not_found())?
        } else {
            user_path
        };

        let mut normalized = PathBuf::new();
        for component in relative_path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(not_found());
                    }
                }
                Component::Normal(name) => normalized.push(name),
                Component::RootDir | Component::Prefix(_) => return Err(not_found()),
            }
        }

        match normalized.components().next() {
            None => Err(not_found()),
            Some(first) if first.as_os_str() == REPOSITORY_DIR => Err(not_found()),
            Some(_) => Ok(normalized),
        }
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Create or overwrite a file, creating its parent directories
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }

        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file if present, then remove any directories left empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    // Deletions go first so that a directory can be replaced by a file of the same
    // name (and vice versa); writes follow, creating directories as needed.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for (file_path, _) in migration.actions_of(ActionType::Delete) {
            self.remove_file(file_path)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (file_path, content) in migration.actions_of(action) {
                let content = content
                    .as_ref()
                    .with_context(|| format!("No content planned for {:?}", file_path))?;
                self.write_file(file_path, content)?;
            }
        }

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
