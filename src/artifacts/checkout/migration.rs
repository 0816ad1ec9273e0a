//! Checkout migration planning
//!
//! A [`Migration`] turns the difference between the current commit's tree and a target
//! tree into file system actions:
//!
//! - files tracked by the current commit but not by the target are deleted,
//! - every file tracked by the target is written with the target's content.
//!
//! ## Safety
//!
//! [`Migration::check_untracked`] refuses to plan over files the current commit does
//! not track, and [`Migration::plan`] loads all blob content up front. Applying the
//! migration therefore only performs writes that cannot fail for repository reasons.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::CommitTree;
use crate::errors::{OrCorrupted, RepositoryError, RepositoryResult};
use bytes::Bytes;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use tracing::debug;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create a file the current commit does not track
    Add,
    /// Delete a file the target does not track
    Delete,
    /// Overwrite a file tracked by both commits
    Modify,
}

/// Planned actions grouped by type; content is present for `Add` and `Modify`
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<Bytes>)>>;

#[derive(Debug, Clone)]
pub struct Migration {
    actions: ActionsSet,
}

impl Migration {
    /// Fail with `UntrackedFileInTheWay` if materializing `target` would clobber a
    /// working-tree file that `current` does not track.
    ///
    /// A file is in the way when it sits at a path the target tracks, when it sits
    /// where the target needs a directory, or when it lives inside a directory the
    /// target wants to replace with a file.
    pub fn check_untracked(
        workspace: &Workspace,
        current: &CommitTree,
        target: &CommitTree,
    ) -> RepositoryResult<()> {
        let untracked = workspace
            .list_files()?
            .into_iter()
            .filter(|path| !current.contains_key(path))
            .collect::<BTreeSet<_>>();

        let in_the_way = untracked
            .iter()
            .filter(|path| {
                target.contains_key(*path)
                    || target.keys().any(|target_path| {
                        target_path.starts_with(path) || path.starts_with(target_path)
                    })
            })
            .cloned()
            .collect::<Vec<_>>();

        if in_the_way.is_empty() {
            Ok(())
        } else {
            debug!(files = ?in_the_way, "untracked files block the checkout");
            Err(RepositoryError::UntrackedFileInTheWay(in_the_way))
        }
    }

    /// Plan the move from `current` to `target`, loading every blob `target` needs
    pub fn plan(
        database: &Database,
        current: &CommitTree,
        target: &CommitTree,
    ) -> RepositoryResult<Self> {
        let mut actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        for path in current.keys().filter(|path| !target.contains_key(*path)) {
            actions
                .entry(ActionType::Delete)
                .or_default()
                .push((path.clone(), None));
        }

        for (path, oid) in target {
            let content = database
                .load_blob(oid)
                .or_corrupted(|| format!("blob {oid} for {} is unreadable", path.display()))?
                .into_content();
            let action = if current.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };

            actions
                .entry(action)
                .or_default()
                .push((path.clone(), Some(content)));
        }

        Ok(Migration { actions })
    }

    pub fn actions_of(&self, action: ActionType) -> &[(PathBuf, Option<Bytes>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
