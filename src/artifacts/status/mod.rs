//! Working tree status inspection
//!
//! - `file_change`: kinds of unstaged changes
//! - `status_info`: comparison of the working tree against the staging area and the
//!   current commit, and the report `status` prints

pub mod file_change;
pub mod status_info;
