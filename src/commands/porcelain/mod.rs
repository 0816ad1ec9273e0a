//! Porcelain commands (user-facing operations)
//!
//! Each command checks every precondition before its first write, then writes
//! objects, the working tree, the staging area and finally references.
//!
//! ## Commands
//!
//! - `init`: Create a repository with its root commit
//! - `add`, `rm`: Stage files for addition or removal
//! - `commit`: Fold the staging area into a new commit
//! - `log`, `global-log`, `find`: Inspect history
//! - `status`: Show branches, staged changes and working tree state
//! - `checkout`: Restore files or switch branches
//! - `branch`, `rm-branch`: Create or delete branches
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
