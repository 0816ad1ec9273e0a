use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::{REPOSITORY_DIR, RepositoryConfig};
use crate::errors::{OrCorrupted, RepositoryError, RepositoryResult};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Handle on a working tree and its `.twig` directory
///
/// Every command runs against an explicit `Repository`; nothing is cached between
/// processes except what the areas persist on disk.
pub struct Repository {
    path: Box<Path>,
    config: RepositoryConfig,
    staging: RefCell<StagingArea>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, config: RepositoryConfig) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve working tree {}", path.display()))?;
        let repository_path = path.join(REPOSITORY_DIR);

        let staging = StagingArea::new(repository_path.join("staging").into_boxed_path());
        let database = Database::new(repository_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            config,
            staging: RefCell::new(staging),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn staging(&self) -> RefMut<'_, StagingArea> {
        self.staging.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_path().is_dir()
    }

    /// Fail with `NotInitialized` unless `init` has run, then load the staging area
    pub fn ensure_initialized(&self) -> RepositoryResult<()> {
        if !self.is_initialized() {
            return Err(RepositoryError::NotInitialized);
        }

        self.staging()
            .rehydrate()
            .or_corrupted(|| String::from("staging area is unreadable"))
    }

    pub fn current_commit_id(&self) -> RepositoryResult<ObjectId> {
        self.refs
            .current_commit()
            .or_corrupted(|| String::from("head does not resolve to a commit"))
    }

    pub fn current_commit(&self) -> RepositoryResult<Commit> {
        let oid = self.current_commit_id()?;
        self.load_commit(&oid)
    }

    /// Load a commit that a ref or another commit refers to
    pub fn load_commit(&self, oid: &ObjectId) -> RepositoryResult<Commit> {
        self.database
            .load_commit(oid)
            .or_corrupted(|| format!("commit {oid} is unreadable"))
    }
}
