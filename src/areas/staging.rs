//! Staging area
//!
//! Records the changes pending for the next commit: files staged for addition (path to
//! blob digest) and files staged for removal. A path is never in both sets at once.
//!
//! The record is persisted as a checksummed binary file (see `artifacts::staging`) and
//! is replaced atomically on every update.

use crate::artifacts::objects::commit::CommitTree;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::checksum::Checksum;
use crate::artifacts::staging::staging_entry::{ENTRY_PREFIX_SIZE, StagingEntry};
use crate::artifacts::staging::staging_header::StagingHeader;
use crate::artifacts::staging::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{RepositoryError, RepositoryResult};
use anyhow::{Context, anyhow};
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Path to the staging file (typically `.twig/staging`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
    header: StagingHeader,
    /// Whether the in-memory record differs from the one on disk
    changed: bool,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            header: StagingHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn staged_addition(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Stage `path` with content `oid`.
    ///
    /// `tracked` is the digest recorded for `path` in the current commit. Staging
    /// content identical to it cancels any pending change for the path instead.
    pub fn stage_add(&mut self, path: PathBuf, oid: ObjectId, tracked: Option<&ObjectId>) {
        self.removals.remove(&path);

        if tracked == Some(&oid) {
            debug!(path = %path.display(), "content matches the current commit, unstaging");
            self.additions.remove(&path);
        } else {
            self.additions.insert(path, oid);
        }

        self.changed = true;
    }

    /// Unstage `path` and, if the current commit tracks it, stage it for removal
    pub fn stage_remove(&mut self, path: &Path, tracked: bool) -> RepositoryResult<()> {
        if !tracked && !self.additions.contains_key(path) {
            return Err(RepositoryError::NoReasonToRemove(path.to_path_buf()));
        }

        self.additions.remove(path);
        if tracked {
            self.removals.insert(path.to_path_buf());
        }

        self.changed = true;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
        self.header = StagingHeader::empty();
        self.changed = true;
    }

    /// Apply the pending additions and removals on top of a commit's tree
    pub fn apply_to(&self, tree: &CommitTree) -> CommitTree {
        let mut tree = tree.clone();

        for (path, oid) in &self.additions {
            tree.insert(path.clone(), oid.clone());
        }
        for path in &self.removals {
            tree.remove(path);
        }

        tree
    }

    /// Load the staging record from disk
    ///
    /// A missing or empty file is an empty staging area. The trailing checksum is
    /// verified before the record is accepted.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the staging file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        if !self.path.exists() {
            return Ok(());
        }

        let mut staging_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .context(format!(
                "Unable to open staging file {}",
                self.path.display()
            ))?;
        let mut lock = file_guard::lock(&mut staging_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock.deref_mut());
        let entries_count = Self::parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;
        reader.verify()?;

        self.header.entries_count = entries_count;
        self.changed = false;

        Ok(())
    }

    /// Persist the staging record, replacing the previous one atomically
    ///
    /// # Locking
    ///
    /// Holds an exclusive lock on the current staging file while the new one is
    /// renamed into place.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut writer = Checksum::new(Vec::new());

        self.header = StagingHeader {
            entries_count: (self.additions.len() + self.removals.len()) as u32,
            ..self.header.clone()
        };
        writer.write(&self.header.serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }
        writer.write_checksum()?;

        let staging_dir = self
            .path
            .parent()
            .context(format!("Invalid staging path {}", self.path.display()))?;
        let temp_path = staging_dir.join(format!("tmp-staging-{}", rand::random::<u32>()));

        let mut staging_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let _lock = file_guard::lock(&mut staging_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .context(format!(
                "Unable to open staging file {}",
                temp_path.display()
            ))?;
        temp_file.write_all(&writer.into_inner())?;
        temp_file.sync_all()?;

        std::fs::rename(&temp_path, &self.path).context(format!(
            "Unable to rename staging file to {}",
            self.path.display()
        ))?;
        debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "wrote staging area"
        );

        self.changed = false;
        Ok(())
    }

    /// All entries in record order: additions, then removals, each sorted by path
    pub fn entries(&self) -> impl Iterator<Item = StagingEntry> + '_ {
        let additions = self
            .additions
            .iter()
            .map(|(path, oid)| StagingEntry::Addition {
                path: path.clone(),
                oid: oid.clone(),
            });
        let removals = self
            .removals
            .iter()
            .map(|path| StagingEntry::Removal { path: path.clone() });

        additions.chain(removals)
    }

    fn reset(&mut self) {
        self.additions.clear();
        self.removals.clear();
        self.header = StagingHeader::empty();
        self.changed = false;
    }

    fn parse_header<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StagingHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid staging file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported staging file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    fn parse_entries<R: Read>(
        &mut self,
        entries_count: u32,
        reader: &mut Checksum<R>,
    ) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let prefix = reader.read(ENTRY_PREFIX_SIZE)?;
            let rest = reader.read(StagingEntry::remaining_size(&prefix)?)?;
            let entry_bytes = [prefix.to_vec(), rest.to_vec()].concat();

            match StagingEntry::deserialize(std::io::Cursor::new(entry_bytes))? {
                StagingEntry::Addition { path, oid } => {
                    if self.removals.contains(&path) || self.additions.insert(path, oid).is_some()
                    {
                        return Err(anyhow!("Duplicate path in staging record"));
                    }
                }
                StagingEntry::Removal { path } => {
                    if self.additions.contains_key(&path) || !self.removals.insert(path) {
                        return Err(anyhow!("Duplicate path in staging record"));
                    }
                }
            }
        }

        Ok(())
    }
}
