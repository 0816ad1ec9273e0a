//! Working-tree materialization
//!
//! Moving the working tree from one commit to another (checkout of a branch, reset,
//! merge) is planned in full before anything is touched: the untracked-file guard
//! runs and every blob the target needs is loaded first, so a failure leaves the
//! working tree as it was.

pub mod migration;
