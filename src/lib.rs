//! twig: a small local version-control engine
//!
//! The crate is organised the same way as the on-disk repository:
//!
//! - `areas`: the persistent parts of a repository (object database, staging area,
//!   references, working tree) and the `Repository` handle that ties them together
//! - `artifacts`: the data types and algorithms operating on those areas
//!   (objects, staging records, history traversal, merge, checkout planning, status)
//! - `commands`: the user-facing operations, implemented on `Repository`
//! - `config`: repository constants and environment-driven settings
//! - `errors`: the structured failure kinds every command reports

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
