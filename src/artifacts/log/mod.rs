//! Commit history traversal
//!
//! - `history`: first-parent walk from a commit to the root (`log`), every stored
//!   commit newest first (`global-log`), and the entry format both commands print.

pub mod history;
