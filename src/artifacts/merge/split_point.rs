//! Split point search for three-way merges
//!
//! The split point of two commits is the common ancestor the merge is computed
//! against. The search runs in two phases:
//!
//! ### Phase 1: Ancestors of the current commit
//!
//! A breadth-first walk over every parent link (both parents of merge commits) marks
//! each commit reachable from the current commit.
//!
//! ### Phase 2: Nearest marked ancestor of the other commit
//!
//! Ancestors of the other commit are walked breadth-first, one distance level at a
//! time. The first level containing a marked commit wins. Ties within that level go to
//! the most recent timestamp, then to the larger id, so the result never depends on
//! traversal order.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = SplitPointFinder::new(|oid| database.load_slim_commit(oid));
//! let split_point = finder.find_split_point(&current, &other)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_CURRENT = 0b01;
        const VISITED_FROM_OTHER = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_CURRENT.bits() | Self::VISITED_FROM_OTHER.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::VISITED_FROM_OTHER) {
            flags.push("OTHER");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the split point of two commits
///
/// Generic over the commit loader so the search runs over the object database or an
/// in-memory graph alike.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Returns `None` only when the two histories share no commit at all
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        let mut cache = HashMap::<ObjectId, SlimCommit>::new();

        self.mark_ancestors(current, &mut states, &mut cache)?;

        let mut level = vec![other.clone()];
        let mut seen = HashSet::from([other.clone()]);
        let mut distance = 0usize;

        while !level.is_empty() {
            let mut candidates = Vec::new();
            for oid in &level {
                let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
                *state |= VisitState::VISITED_FROM_OTHER;

                if state.contains(VisitState::VISITED_FROM_BOTH) {
                    candidates.push(self.load(oid, &mut cache)?);
                }
            }

            if let Some(split_point) = candidates.into_iter().max() {
                debug!(
                    split_point = %split_point.oid,
                    distance,
                    "found split point"
                );
                return Ok(Some(split_point.oid));
            }

            let mut next_level = Vec::new();
            for oid in &level {
                for parent in self.load(oid, &mut cache)?.parents {
                    if seen.insert(parent.clone()) {
                        next_level.push(parent);
                    }
                }
            }

            level = next_level;
            distance += 1;
        }

        debug!(%current, %other, "histories share no commit");
        Ok(None)
    }

    fn mark_ancestors(
        &self,
        start: &ObjectId,
        states: &mut HashMap<ObjectId, VisitState>,
        cache: &mut HashMap<ObjectId, SlimCommit>,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::from([start.clone()]);
        states.insert(start.clone(), VisitState::VISITED_FROM_CURRENT);

        while let Some(oid) = queue.pop_front() {
            for parent in self.load(&oid, cache)?.parents {
                let state = states.entry(parent.clone()).or_insert(VisitState::NONE);
                if !state.contains(VisitState::VISITED_FROM_CURRENT) {
                    *state |= VisitState::VISITED_FROM_CURRENT;
                    queue.push_back(parent);
                }
            }
        }

        Ok(())
    }

    fn load(
        &self,
        oid: &ObjectId,
        cache: &mut HashMap<ObjectId, SlimCommit>,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(commit) = cache.get(oid) {
            return Ok(commit.clone());
        }

        let commit = (self.commit_loader)(oid)?;
        cache.insert(oid.clone(), commit.clone());

        Ok(commit)
    }
}
