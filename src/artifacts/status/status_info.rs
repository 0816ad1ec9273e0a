use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::CommitTree;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;

/// Everything `status` reports, each section sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub current_branch: BranchName,
    pub branches: Vec<BranchName>,
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub unstaged_changes: ChangeSet,
    pub untracked_files: FileSet,
}

impl StatusReport {
    /// Compare the working tree against the staging area and the current commit's tree
    pub fn inspect(
        current_branch: BranchName,
        branches: Vec<BranchName>,
        head_tree: &CommitTree,
        staging: &StagingArea,
        workspace: &Workspace,
    ) -> anyhow::Result<Self> {
        let workspace_files = workspace.list_files()?;
        let mut unstaged_changes = ChangeSet::new();

        for (path, staged_oid) in staging.additions() {
            if !workspace_files.contains(path) {
                unstaged_changes.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &workspace.parse_blob(path)?.object_id()? != staged_oid {
                unstaged_changes.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        let tracked_unstaged = head_tree.iter().filter(|(path, _)| {
            staging.staged_addition(path).is_none() && !staging.is_staged_for_removal(path)
        });
        for (path, tracked_oid) in tracked_unstaged {
            if !workspace_files.contains(path) {
                unstaged_changes.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &workspace.parse_blob(path)?.object_id()? != tracked_oid {
                unstaged_changes.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        let untracked_files = workspace_files
            .into_iter()
            .filter(|path| {
                let known = staging.staged_addition(path).is_some() || head_tree.contains_key(path);
                !known || staging.is_staged_for_removal(path)
            })
            .collect();

        Ok(StatusReport {
            current_branch,
            branches,
            staged_files: staging.additions().keys().cloned().collect(),
            removed_files: staging.removals().clone(),
            unstaged_changes,
            untracked_files,
        })
    }
}

fn write_section<I, T>(f: &mut fmt::Formatter<'_>, title: &str, lines: I) -> fmt::Result
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    writeln!(f, "=== {title} ===")?;
    for line in lines {
        writeln!(f, "{line}")?;
    }
    writeln!(f)
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(
            f,
            "Branches",
            self.branches.iter().map(|branch| {
                if branch == &self.current_branch {
                    format!("*{branch}")
                } else {
                    branch.to_string()
                }
            }),
        )?;
        write_section(
            f,
            "Staged Files",
            self.staged_files.iter().map(|path| path.display()),
        )?;
        write_section(
            f,
            "Removed Files",
            self.removed_files.iter().map(|path| path.display()),
        )?;
        write_section(
            f,
            "Modifications Not Staged For Commit",
            self.unstaged_changes
                .iter()
                .map(|(path, change)| format!("{} {change}", path.display())),
        )?;
        write_section(
            f,
            "Untracked Files",
            self.untracked_files.iter().map(|path| path.display()),
        )
    }
}
