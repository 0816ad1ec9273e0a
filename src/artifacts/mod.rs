//! Data structures and algorithms
//!
//! - `branch`: Branch name validation and symbolic ref names
//! - `checkout`: Untracked-file guard and working-tree migration planning
//! - `core`: Shared utilities (pager wrapper)
//! - `log`: Commit history traversal and log rendering
//! - `merge`: Split point search, per-file merge classification, conflict files
//! - `objects`: Object types (blob, commit) and their encodings
//! - `staging`: On-disk staging record (header, entries, checksum)
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod staging;
pub mod status;
