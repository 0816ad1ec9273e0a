//! Staging entries
//!
//! An entry is either a pending addition (path plus blob digest) or a pending removal
//! (path only).

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Kind byte plus the path length
pub const ENTRY_PREFIX_SIZE: usize = 3;

/// Size of a raw blob digest
pub const DIGEST_SIZE: usize = 20;

const ADDITION: u8 = b'A';
const REMOVAL: u8 = b'R';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingEntry {
    Addition { path: PathBuf, oid: ObjectId },
    Removal { path: PathBuf },
}

impl StagingEntry {
    pub fn path(&self) -> &Path {
        match self {
            StagingEntry::Addition { path, .. } | StagingEntry::Removal { path } => path,
        }
    }

    /// Number of bytes following the prefix, given the kind byte and path length
    pub fn remaining_size(prefix: &[u8]) -> anyhow::Result<usize> {
        if prefix.len() != ENTRY_PREFIX_SIZE {
            return Err(anyhow!("Invalid staging entry prefix"));
        }

        let path_len = NetworkEndian::read_u16(&prefix[1..3]) as usize;
        match prefix[0] {
            ADDITION => Ok(DIGEST_SIZE + path_len),
            REMOVAL => Ok(path_len),
            kind => Err(anyhow!("Unknown staging entry kind {kind:#04x}")),
        }
    }
}

impl Packable for StagingEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self
            .path()
            .to_str()
            .ok_or_else(|| anyhow!("Invalid staged path {}", self.path().display()))?;
        let path_len = u16::try_from(path.len())
            .map_err(|_| anyhow!("Staged path is too long: {path}"))?;

        let mut entry_bytes = Vec::new();
        match self {
            StagingEntry::Addition { oid, .. } => {
                entry_bytes.write_u8(ADDITION)?;
                entry_bytes.write_u16::<NetworkEndian>(path_len)?;
                oid.write_h40_to(&mut entry_bytes)?;
            }
            StagingEntry::Removal { .. } => {
                entry_bytes.write_u8(REMOVAL)?;
                entry_bytes.write_u16::<NetworkEndian>(path_len)?;
            }
        }
        entry_bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for StagingEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let kind = reader.read_u8()?;
        let path_len = reader.read_u16::<NetworkEndian>()? as usize;

        let oid = match kind {
            ADDITION => Some(ObjectId::read_h40_from(&mut reader)?),
            REMOVAL => None,
            kind => return Err(anyhow!("Unknown staging entry kind {kind:#04x}")),
        };

        let mut path_bytes = vec![0; path_len];
        reader.read_exact(&mut path_bytes)?;
        let path = PathBuf::from(
            String::from_utf8(path_bytes).map_err(|_| anyhow!("Invalid UTF-8 in staged path"))?,
        );

        Ok(match oid {
            Some(oid) => StagingEntry::Addition { path, oid },
            None => StagingEntry::Removal { path },
        })
    }
}
