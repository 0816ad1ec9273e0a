//! Core repository components
//!
//! - `database`: content-addressed store for blobs and commits
//! - `staging`: pending additions and removals for the next commit
//! - `refs`: branches and the head reference
//! - `repository`: the handle tying the areas together
//! - `workspace`: working tree file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
