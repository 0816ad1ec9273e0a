//! Stored object types and operations
//!
//! Every piece of repository content is an immutable object identified by the SHA-1
//! digest of its serialized form. There are two kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot of the whole tree (path to blob mapping), parents, timestamp
//!   and message
//!
//! All objects serialize to `<type> <size>\0<content>`; the digest is taken over that
//! whole byte string, so identical content always maps to the same identifier.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated digest in listings
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
