//! Per-file merge classification
//!
//! Every path present in the split point, the current commit or the other commit is
//! classified by comparing its digest in the three trees. Absence is a value of its
//! own: a file missing from two trees counts as equal in both.
//!
//! | split vs current | split vs other | current vs other | outcome      |
//! |------------------|----------------|------------------|--------------|
//! | same             | same           |                  | keep current |
//! | same             | changed        |                  | take other   |
//! | changed          | same           |                  | keep current |
//! | changed          | changed        | same             | keep current |
//! | changed          | changed        | different        | conflict     |

use crate::artifacts::objects::commit::CommitTree;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMerge {
    /// The current commit's version (or absence) stands
    KeepCurrent,
    /// Only the other branch changed the file; `None` means it deleted it
    TakeOther(Option<ObjectId>),
    /// Both branches changed the file differently
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl FileMerge {
    pub fn classify(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        let current_changed = split != current;
        let other_changed = split != other;

        match (current_changed, other_changed) {
            (false, true) => FileMerge::TakeOther(other.cloned()),
            (true, true) if current != other => FileMerge::Conflict {
                current: current.cloned(),
                other: other.cloned(),
            },
            _ => FileMerge::KeepCurrent,
        }
    }
}

/// Outcome of classifying every path of a three-way merge
#[derive(Debug, Clone, Default)]
pub struct MergeResolution {
    files: BTreeMap<PathBuf, FileMerge>,
}

impl MergeResolution {
    pub fn resolve(split: &CommitTree, current: &CommitTree, other: &CommitTree) -> Self {
        let paths = split
            .keys()
            .chain(current.keys())
            .chain(other.keys())
            .collect::<BTreeSet<_>>();

        let files = paths
            .into_iter()
            .map(|path| {
                let file_merge =
                    FileMerge::classify(split.get(path), current.get(path), other.get(path));
                if file_merge != FileMerge::KeepCurrent {
                    debug!(path = %path.display(), outcome = ?file_merge, "classified file");
                }

                (path.clone(), file_merge)
            })
            .collect();

        MergeResolution { files }
    }

    /// Conflicting paths with the current and other digests, in path order
    pub fn conflicts(&self) -> impl Iterator<Item = (&Path, Option<&ObjectId>, Option<&ObjectId>)> {
        self.files.iter().filter_map(|(path, file_merge)| match file_merge {
            FileMerge::Conflict { current, other } => {
                Some((path.as_path(), current.as_ref(), other.as_ref()))
            }
            _ => None,
        })
    }

    /// The merged tree: `current` with the other branch's changes applied and each
    /// conflicting path mapped to its entry in `conflict_blobs`
    pub fn merged_tree(
        &self,
        current: &CommitTree,
        conflict_blobs: &BTreeMap<PathBuf, ObjectId>,
    ) -> anyhow::Result<CommitTree> {
        let mut merged = current.clone();

        for (path, file_merge) in &self.files {
            match file_merge {
                FileMerge::KeepCurrent => {}
                FileMerge::TakeOther(Some(oid)) => {
                    merged.insert(path.clone(), oid.clone());
                }
                FileMerge::TakeOther(None) => {
                    merged.remove(path);
                }
                FileMerge::Conflict { .. } => {
                    let oid = conflict_blobs.get(path).ok_or_else(|| {
                        anyhow::anyhow!("no conflict content for {}", path.display())
                    })?;
                    merged.insert(path.clone(), oid.clone());
                }
            }
        }

        Ok(merged)
    }
}
