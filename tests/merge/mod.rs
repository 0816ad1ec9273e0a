mod merge_ancestor_branch;
mod merge_conflict_writes_markers;
mod merge_fast_forward;
mod merge_remove_modify_conflict;
