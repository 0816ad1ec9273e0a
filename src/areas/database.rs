//! Content-addressed object database
//!
//! Blobs and commits are stored zlib-compressed under
//! `objects/<blobs|commits>/<xx>/<38 hex chars>`. Objects are write-once: storing an
//! object whose file already exists is a no-op, and new files are written to a temp
//! name and renamed into place so readers never observe a partial object.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{RepositoryError, RepositoryResult};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(ObjectType::Blob.dir_name())
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(ObjectType::Commit.dir_name())
    }

    /// Persist an object unless it is already present and return its ID
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if object_path.exists() {
            debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object.serialize()?)?;
        debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;

        Blob::deserialize(object_reader)
    }

    /// Load a commit and check that its content still hashes to `object_id`
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        let commit = Commit::deserialize(object_reader)
            .with_context(|| format!("Unable to decode commit {object_id}"))?;

        if commit.oid() != object_id {
            anyhow::bail!(
                "Commit {} does not match its content digest {}",
                object_id,
                commit.oid()
            );
        }

        Ok(commit)
    }

    pub fn load_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.load_commit(object_id)?.to_slim())
    }

    /// Every stored commit ID, in lexical order
    pub fn all_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.commits_path();
        if !commits_path.exists() {
            return Ok(Vec::new());
        }

        let mut object_ids = WalkDir::new(&commits_path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&commits_path).ok()?;
                let full_oid = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<String>();

                ObjectId::try_parse(full_oid).ok()
            })
            .collect::<Vec<_>>();
        object_ids.sort();

        Ok(object_ids)
    }

    /// Find all commits whose ID starts with the given prefix.
    ///
    /// # Performance
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For 1-character prefixes, must search all directories (slower)
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let commits_path = self.commits_path();

        if prefix.len() < 2 {
            return Ok(self
                .all_commit_ids()?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(&prefix))
                .collect());
        }

        let mut matches = Vec::new();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = commits_path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let file_name_str = file_name.to_string_lossy();

                if file_name_str.starts_with(file_prefix)
                    && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name_str}"))
                {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }

    /// Resolve a full or abbreviated commit ID to exactly one stored commit
    pub fn resolve_commit_prefix(&self, prefix: &str) -> RepositoryResult<ObjectId> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(RepositoryError::CommitNotFound(prefix.to_string()));
        }

        let mut matches = self.find_commits_by_prefix(prefix)?;

        match matches.len() {
            0 => Err(RepositoryError::CommitNotFound(prefix.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(RepositoryError::AmbiguousCommitId {
                prefix: prefix.to_string(),
                candidates: matches.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    fn object_file(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.path
            .join(object_type.dir_name())
            .join(object_id.to_path())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.object_file(expected_type, object_id);
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!("Object {object_id} is a {object_type}, expected a {expected_type}");
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
