//! Branch references and head
//!
//! Branches live under `refs/branches/<name>` and contain the 40-character id of
//! their tip commit. `refs/head` is a symbolic reference (`ref: refs/branches/<name>`)
//! naming the checked-out branch; head always goes through a branch.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, RepositoryResult};
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.twig`)
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Name of the branch head points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        match SymRefOrOid::read_symref_or_oid(&self.head_path())? {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                BranchName::try_parse_sym_ref_name(&sym_ref_name)
            }
            Some(SymRefOrOid::Oid(oid)) => {
                anyhow::bail!("head points directly at commit {oid} instead of a branch")
            }
            None => anyhow::bail!("head reference is missing"),
        }
    }

    /// Tip of the checked-out branch
    pub fn current_commit(&self) -> anyhow::Result<ObjectId> {
        let branch_name = self.current_branch()?;

        self.read_branch(&branch_name)?
            .with_context(|| format!("current branch {branch_name} has no commit"))
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        match SymRefOrOid::read_symref_or_oid(&self.branch_path(branch_name))? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                anyhow::bail!("branch {branch_name} is a symbolic reference to {sym_ref_name}")
            }
            None => Ok(None),
        }
    }

    /// Create a branch pointing at `source_oid`
    pub fn create_branch(
        &self,
        branch_name: &BranchName,
        source_oid: &ObjectId,
    ) -> RepositoryResult<()> {
        let branch_path = self.branch_path(branch_name);

        if branch_path.is_file() {
            return Err(RepositoryError::BranchAlreadyExists(branch_name.to_string()));
        }

        // `a/b` cannot coexist with a branch `a`, nor `a` with `a/b`
        let clashes_with_hierarchy = branch_path.is_dir()
            || branch_path
                .ancestors()
                .skip(1)
                .take_while(|ancestor| *ancestor != self.branches_path().as_path())
                .any(Path::is_file);
        if clashes_with_hierarchy {
            return Err(RepositoryError::InvalidBranchName(branch_name.to_string()));
        }

        self.update_ref_file(&branch_path, source_oid.as_ref())?;
        debug!(branch = %branch_name, oid = %source_oid, "created branch");

        Ok(())
    }

    /// Delete a branch that is not checked out and return the commit it pointed to
    pub fn delete_branch(&self, branch_name: &BranchName) -> RepositoryResult<ObjectId> {
        let oid = self
            .read_branch(branch_name)?
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()))?;

        if self.is_current_branch(branch_name)? {
            return Err(RepositoryError::CannotRemoveCurrentBranch);
        }

        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        debug!(branch = %branch_name, oid = %oid, "deleted branch");

        Ok(oid)
    }

    /// Point an existing or new branch at `oid`
    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(branch_name), oid.as_ref())?;
        debug!(branch = %branch_name, oid = %oid, "updated branch");

        Ok(())
    }

    /// Repoint head at `branch_name`; the working tree must already match it
    pub fn move_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let sym_ref_name = SymRefName::for_branch(branch_name);
        self.update_ref_file(
            &self.head_path(),
            &format!("ref: {}", sym_ref_name.as_ref_path()),
        )?;
        debug!(branch = %branch_name, "moved head");

        Ok(())
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let branches_path = self.branches_path();

        let mut branches = WalkDir::new(&branches_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative_path = entry.path().strip_prefix(&branches_path)?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name).map_err(anyhow::Error::from)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;
        lock.deref_mut().write_all(b"\n")?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.branches_path().as_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        self.branches_path().join(branch_name.as_ref())
    }

    pub fn head_path(&self) -> PathBuf {
        self.refs_path().join("head")
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn branches_path(&self) -> PathBuf {
        self.refs_path().join("branches")
    }
}
