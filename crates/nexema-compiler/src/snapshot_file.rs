//! Binary container for snapshots written to disk.
//!
//! Layout: a 16-byte header followed by the snapshot as compact JSON.
//!
//! - 0-3: magic `b"NEXS"`
//! - 4-7: container format version
//! - 8-11: CRC32 of the body
//! - 12-15: body length in bytes
//!
//! All integers are little-endian.

use std::fs;
use std::path::Path;

use nexema_core::Snapshot;

use crate::{Error, Result};

pub const MAGIC: [u8; 4] = *b"NEXS";
pub const FORMAT_VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 of everything after the header.
    pub checksum: u32,
    pub body_len: u32,
}

impl Header {
    fn for_body(body: &[u8]) -> Result<Self> {
        let body_len = u32::try_from(body.len()).map_err(|_| {
            Error::InvalidSnapshotFile(format!("body too large ({} bytes)", body.len()))
        })?;
        Ok(Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            checksum: crc32fast::hash(body),
            body_len,
        })
    }

    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let word = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: word(4),
            checksum: word(8),
            body_len: word(12),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.body_len.to_le_bytes());
        bytes
    }
}

/// Serialize `snapshot` into a self-checking byte buffer.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let body = serde_json::to_vec(snapshot)?;
    let header = Header::for_body(&body)?;

    let mut out = Vec::with_capacity(HEADER_SIZE + body.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Inverse of [`encode`]. Rejects truncated, corrupted or foreign input.
pub fn decode(bytes: &[u8]) -> Result<Snapshot> {
    let Some((head, body)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
        return Err(Error::InvalidSnapshotFile(format!(
            "expected at least {HEADER_SIZE} bytes, found {}",
            bytes.len()
        )));
    };
    let header = Header::from_bytes(head);

    if header.magic != MAGIC {
        return Err(Error::InvalidSnapshotFile(format!(
            "bad magic {:?}",
            header.magic
        )));
    }
    if header.version != FORMAT_VERSION {
        return Err(Error::InvalidSnapshotFile(format!(
            "unsupported format version {} (expected {FORMAT_VERSION})",
            header.version
        )));
    }
    if body.len() != header.body_len as usize {
        return Err(Error::InvalidSnapshotFile(format!(
            "body length mismatch: header says {}, found {}",
            header.body_len,
            body.len()
        )));
    }
    let computed = crc32fast::hash(body);
    if computed != header.checksum {
        return Err(Error::InvalidSnapshotFile(format!(
            "checksum mismatch: expected {:#010x}, found {computed:#010x}",
            header.checksum
        )));
    }

    Ok(serde_json::from_slice(body)?)
}

pub fn write_file(path: impl AsRef<Path>, snapshot: &Snapshot) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(snapshot)?;
    fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "snapshot read");
    decode(&bytes)
}
