//! Three-way merge
//!
//! - `split_point`: nearest common ancestor of the two branch tips
//! - `resolution`: per-file classification against the split point
//! - `conflict`: content written for conflicting files

pub mod conflict;
pub mod resolution;
pub mod split_point;
