use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::resolution::MergeResolution;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{OrCorrupted, RepositoryError, RepositoryResult};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What `merge` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A merge commit was created; `conflicts` lists the files written with
    /// conflict markers, in path order
    Merged {
        commit: Commit,
        conflicts: Vec<PathBuf>,
    },
    /// The current branch was behind and now points at the other branch's tip
    FastForwarded(ObjectId),
    /// The other branch is an ancestor of the current one
    AlreadyUpToDate,
}

impl Repository {
    /// Merge the tip of `other` into the current branch.
    ///
    /// All preconditions are checked before anything is written, in this order:
    /// pending staged changes, unknown branch, merge with itself, untracked files the
    /// other branch would overwrite.
    pub fn merge(&self, other: &str) -> RepositoryResult<MergeOutcome> {
        self.ensure_initialized()?;

        if !self.staging().is_empty() {
            return Err(RepositoryError::UncommittedChanges);
        }

        let other_name = BranchName::try_parse(other.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(other.to_string()))?;
        let other_oid = self
            .refs()
            .read_branch(&other_name)
            .or_corrupted(|| format!("branch {other_name} is unreadable"))?
            .ok_or_else(|| RepositoryError::BranchNotFound(other.to_string()))?;

        let current_name = self
            .refs()
            .current_branch()
            .or_corrupted(|| String::from("head does not name a branch"))?;
        if current_name == other_name {
            return Err(RepositoryError::MergeWithSelf);
        }

        let head = self.current_commit()?;
        let other_commit = self.load_commit(&other_oid)?;
        Migration::check_untracked(self.workspace(), head.tree(), other_commit.tree())?;

        let finder = SplitPointFinder::new(|oid: &ObjectId| self.database().load_slim_commit(oid));
        let split_oid = finder
            .find_split_point(head.oid(), &other_oid)
            .or_corrupted(|| format!("history of {} is unreadable", head.oid()))?
            .ok_or_else(|| {
                RepositoryError::Corrupted(format!(
                    "{} and {other_oid} share no common ancestor",
                    head.oid()
                ))
            })?;

        if split_oid == other_oid {
            info!(branch = %other_name, "already up to date");
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        if &split_oid == head.oid() {
            self.migrate(head.tree(), other_commit.tree())?;
            self.refs().update_branch(&current_name, &other_oid)?;

            info!(branch = %current_name, oid = %other_oid, "fast-forwarded");
            return Ok(MergeOutcome::FastForwarded(other_oid));
        }

        let split = self.load_commit(&split_oid)?;
        let resolution = MergeResolution::resolve(split.tree(), head.tree(), other_commit.tree());

        let mut conflict_blobs = BTreeMap::new();
        for (path, current_oid, other_side_oid) in resolution.conflicts() {
            let current_content = self.load_side(current_oid, path)?;
            let other_content = self.load_side(other_side_oid, path)?;

            let content = conflict_content(
                current_content.as_deref(),
                other_content.as_deref(),
                other_name.as_ref(),
            );
            let blob_oid = self.database().store(&Blob::new(content))?;

            warn!(path = %path.display(), "merge conflict");
            conflict_blobs.insert(path.to_path_buf(), blob_oid);
        }

        let merged_tree = resolution.merged_tree(head.tree(), &conflict_blobs)?;
        let commit = Commit::new(
            Parents::Merge(head.oid().clone(), other_oid),
            merged_tree,
            self.config().now(),
            format!("Merged {other_name} into {current_name}."),
        )?;
        self.database().store(&commit)?;

        self.migrate(head.tree(), commit.tree())?;
        self.refs().update_branch(&current_name, commit.oid())?;

        info!(
            branch = %current_name,
            oid = %commit.oid(),
            conflicts = conflict_blobs.len(),
            "created merge commit"
        );

        Ok(MergeOutcome::Merged {
            commit,
            conflicts: conflict_blobs.into_keys().collect(),
        })
    }

    fn load_side(
        &self,
        blob_oid: Option<&ObjectId>,
        path: &Path,
    ) -> RepositoryResult<Option<Bytes>> {
        blob_oid
            .map(|oid| {
                self.database()
                    .load_blob(oid)
                    .map(Blob::into_content)
                    .or_corrupted(|| format!("blob {oid} for {} is unreadable", path.display()))
            })
            .transpose()
    }
}
