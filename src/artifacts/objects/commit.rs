//! Commit object
//!
//! Commits are immutable snapshots of the whole tracked tree. They contain:
//! - Zero, one or two parent commit IDs (root, normal and merge commits)
//! - A second-precision timestamp
//! - The mapping from repository-relative path to blob digest
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! format 1
//! parent <parent-sha>
//! timestamp <rfc-3339 timestamp>
//! blob <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! Parent lines appear zero to two times, blob lines once per tracked file in path
//! order. The message runs to the end of the object, untouched.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, digest, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::config::INITIAL_COMMIT_MESSAGE;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat, SubsecRound};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Version of the commit record layout written by this crate
pub const COMMIT_FORMAT_VERSION: u32 = 1;

/// Mapping from repository-relative path to blob digest
pub type CommitTree = BTreeMap<PathBuf, ObjectId>;

/// Parent links of a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parents {
    /// The repository's first commit
    Root,
    /// A regular commit on top of one parent
    Normal(ObjectId),
    /// A merge commit: the branch merged into, then the branch merged from
    Merge(ObjectId, ObjectId),
}

impl Parents {
    /// The first parent, which `log` follows
    pub fn first(&self) -> Option<&ObjectId> {
        match self {
            Parents::Root => None,
            Parents::Normal(parent) | Parents::Merge(parent, _) => Some(parent),
        }
    }

    pub fn iter(&self) -> std::vec::IntoIter<&ObjectId> {
        match self {
            Parents::Root => vec![],
            Parents::Normal(parent) => vec![parent],
            Parents::Merge(current, other) => vec![current, other],
        }
        .into_iter()
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Parents::Merge(..))
    }
}

impl TryFrom<Vec<ObjectId>> for Parents {
    type Error = anyhow::Error;

    fn try_from(mut parents: Vec<ObjectId>) -> anyhow::Result<Self> {
        match parents.len() {
            0 => Ok(Parents::Root),
            1 => Ok(Parents::Normal(parents.remove(0))),
            2 => {
                let other = parents.remove(1);
                Ok(Parents::Merge(parents.remove(0), other))
            }
            count => anyhow::bail!("Invalid commit object: {count} parents"),
        }
    }
}

/// Whether `path` can be written to a `blob` line: valid UTF-8 without line breaks
pub fn is_trackable_path(path: &Path) -> bool {
    path.to_str().is_some_and(|path| !path.contains('\n'))
}

/// Slim representation of a commit
///
/// Contains only what graph traversal needs, so the split point search can run over
/// any storage backend (or an in-memory graph in tests).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: DateTime<FixedOffset>,
}

impl PartialOrd for SlimCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlimCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.oid.cmp(&other.oid))
    }
}

/// Immutable commit
///
/// The object ID is computed once when the commit is built and cached, since it is a
/// pure function of the other fields.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    parents: Parents,
    timestamp: DateTime<FixedOffset>,
    tree: CommitTree,
    message: String,
}

impl Commit {
    /// Build a commit; the timestamp is truncated to whole seconds
    pub fn new(
        parents: Parents,
        tree: CommitTree,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> anyhow::Result<Self> {
        let timestamp = timestamp.trunc_subsecs(0);
        let content = Self::serialize_content(&parents, &timestamp, &tree, &message)?;
        let oid = digest(&with_header(ObjectType::Commit, &content))?;

        Ok(Commit {
            oid,
            parents,
            timestamp,
            tree,
            message,
        })
    }

    /// The commit every repository starts from: no parent, no files, epoch timestamp
    pub fn root() -> anyhow::Result<Self> {
        let epoch = DateTime::from_timestamp(0, 0)
            .context("epoch timestamp out of range")?
            .fixed_offset();

        Self::new(
            Parents::Root,
            CommitTree::new(),
            epoch,
            INITIAL_COMMIT_MESSAGE.to_string(),
        )
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn tree(&self) -> &CommitTree {
        &self.tree
    }

    /// Digest of the blob tracked at `path`, if any
    pub fn tracks(&self, path: &Path) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    /// Timestamp in the form "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self) -> SlimCommit {
        SlimCommit {
            oid: self.oid.clone(),
            parents: self.parents.iter().cloned().collect(),
            timestamp: self.timestamp,
        }
    }

    fn serialize_content(
        parents: &Parents,
        timestamp: &DateTime<FixedOffset>,
        tree: &CommitTree,
        message: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let mut header = vec![format!("format {COMMIT_FORMAT_VERSION}")];

        for parent in parents.iter() {
            header.push(format!("parent {}", parent.as_ref()));
        }
        header.push(format!(
            "timestamp {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
        ));
        for (path, oid) in tree {
            let path = path
                .to_str()
                .filter(|_| is_trackable_path(path))
                .with_context(|| format!("path cannot be tracked: {}", path.display()))?;
            header.push(format!("blob {} {}", oid.as_ref(), path));
        }

        let mut content = header.join("\n").into_bytes();
        content.extend_from_slice(b"\n\n");
        content.extend_from_slice(message.as_bytes());

        Ok(content)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content =
            Self::serialize_content(&self.parents, &self.timestamp, &self.tree, &self.message)?;

        Ok(with_header(self.object_type(), &content))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: content is not UTF-8")?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        // paths may end in '\r', so only '\n' separates lines
        let mut lines = header.split('\n');

        let version = lines
            .next()
            .and_then(|line| line.strip_prefix("format "))
            .context("Invalid commit object: missing format line")?;
        if version != COMMIT_FORMAT_VERSION.to_string() {
            anyhow::bail!("Unsupported commit format version: {version}");
        }

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }

        let timestamp = next_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .context("Invalid commit object: unparsable timestamp")?;

        let mut tree = CommitTree::new();
        for line in lines {
            let entry = line
                .strip_prefix("blob ")
                .context("Invalid commit object: invalid blob line")?;
            let (oid, path) = entry
                .split_once(' ')
                .context("Invalid commit object: blob line without path")?;

            tree.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
        }

        Self::new(
            parents.try_into()?,
            tree,
            timestamp,
            message.to_string(),
        )
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(self.oid.clone())
    }
}
