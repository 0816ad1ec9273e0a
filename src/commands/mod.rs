//! Command implementations
//!
//! Every user-facing operation is an inherent method on
//! [`Repository`](crate::areas::repository::Repository), one file per command under
//! `porcelain`. Commands return structured results and leave rendering to the binary.

pub mod porcelain;
