//! Serialized, compressed model artifact.
//!
//! The training pipeline ships its fitted model as a single binary file;
//! this module owns the layout. The payload is gzip-compressed; inside:
//!
//! ```text
//! [4-byte magic: "SGR1"]
//! [4-byte metadata_len: u32 little-endian]
//! [JSON metadata: model type, factor count, rating scale, id lists]
//! [4-byte n_blocks: u32 little-endian]
//! [Per block: name_len, name, value_count, f32 values little-endian]
//! [4-byte CRC32: checksum of all preceding bytes]
//! ```
//!
//! Any defect (missing file, bad magic, checksum mismatch, truncation)
//! surfaces immediately as [`SugerirError::ModelLoad`]; recommendation
//! never proceeds on a partially decoded model.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SugerirError};

/// Magic bytes opening the decompressed payload.
pub const SGR_MAGIC: [u8; 4] = *b"SGR1";

/// Artifact metadata, stored as JSON inside the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Model family, e.g. `"matrix_factorization"`.
    pub model_type: String,
    /// Latent factor count per user/item.
    pub n_factors: usize,
    /// Lower bound of the trained rating scale.
    pub rating_min: f64,
    /// Upper bound of the trained rating scale.
    pub rating_max: f64,
    /// Global mean rating over the training data.
    pub global_mean: f64,
    /// Customer ids in training order; row i of user blocks belongs to users[i].
    pub users: Vec<String>,
    /// Product ids in training order; row i of item blocks belongs to items[i].
    pub items: Vec<String>,
}

/// Writes artifacts in the format [`ArtifactReader`] consumes.
///
/// The training pipeline side; inside this crate it exists for tests and
/// tooling that need to produce artifacts.
#[derive(Debug)]
pub struct ArtifactWriter {
    metadata: ArtifactMetadata,
    blocks: Vec<(String, Vec<f32>)>,
}

impl ArtifactWriter {
    /// Create a writer for the given metadata.
    #[must_use]
    pub fn new(metadata: ArtifactMetadata) -> Self {
        Self {
            metadata,
            blocks: Vec::new(),
        }
    }

    /// Append a named block of f32 values.
    pub fn add_block(&mut self, name: impl Into<String>, values: Vec<f32>) {
        self.blocks.push((name.into(), values));
    }

    /// Serialize and gzip-compress the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if metadata encoding or compression fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let metadata = serde_json::to_vec(&self.metadata)
            .map_err(|e| SugerirError::Other(format!("metadata encode failed: {e}")))?;

        let mut payload = Vec::new();
        payload.extend_from_slice(&SGR_MAGIC);
        payload.extend_from_slice(&(metadata.len() as u32).to_le_bytes());
        payload.extend_from_slice(&metadata);
        payload.extend_from_slice(&(self.blocks.len() as u32).to_le_bytes());
        for (name, values) in &self.blocks {
            payload.extend_from_slice(&(name.len() as u32).to_le_bytes());
            payload.extend_from_slice(name.as_bytes());
            payload.extend_from_slice(&(values.len() as u32).to_le_bytes());
            for value in values {
                payload.extend_from_slice(&value.to_le_bytes());
            }
        }
        let crc = crc32(&payload);
        payload.extend_from_slice(&crc.to_le_bytes());

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&payload)?;
        Ok(encoder.finish()?)
    }

    /// Write the artifact to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Decodes artifacts written by [`ArtifactWriter`].
#[derive(Debug)]
pub struct ArtifactReader {
    metadata: ArtifactMetadata,
    blocks: HashMap<String, Vec<f32>>,
}

impl ArtifactReader {
    /// Open and decode an artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ModelLoad`] if the file is missing,
    /// corrupt, or undecodable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let compressed = std::fs::read(path).map_err(|e| {
            SugerirError::model_load(format!("cannot read {}: {e}", path.display()))
        })?;
        let reader = Self::from_bytes(&compressed)?;
        debug!(path = %path.display(), blocks = reader.blocks.len(), "model artifact loaded");
        Ok(reader)
    }

    /// Decode an artifact from its compressed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ModelLoad`] on any structural defect.
    pub fn from_bytes(compressed: &[u8]) -> Result<Self> {
        let mut payload = Vec::new();
        GzDecoder::new(compressed)
            .read_to_end(&mut payload)
            .map_err(|e| SugerirError::model_load(format!("decompression failed: {e}")))?;

        if payload.len() < SGR_MAGIC.len() + 8 {
            return Err(SugerirError::model_load("payload truncated"));
        }
        if payload[..4] != SGR_MAGIC {
            return Err(SugerirError::model_load(format!(
                "bad magic bytes {:?}, expected {SGR_MAGIC:?}",
                &payload[..4]
            )));
        }

        let body_len = payload.len() - 4;
        let stored_crc = u32::from_le_bytes([
            payload[body_len],
            payload[body_len + 1],
            payload[body_len + 2],
            payload[body_len + 3],
        ]);
        let actual_crc = crc32(&payload[..body_len]);
        if stored_crc != actual_crc {
            return Err(SugerirError::model_load(format!(
                "checksum mismatch: expected 0x{stored_crc:08X}, got 0x{actual_crc:08X}"
            )));
        }

        let mut cursor = Cursor::new(&payload[4..body_len]);
        let metadata_len = cursor.read_u32()? as usize;
        let metadata_bytes = cursor.read_bytes(metadata_len)?;
        let metadata: ArtifactMetadata = serde_json::from_slice(metadata_bytes)
            .map_err(|e| SugerirError::model_load(format!("metadata decode failed: {e}")))?;

        let n_blocks = cursor.read_u32()? as usize;
        let mut blocks = HashMap::with_capacity(n_blocks);
        for _ in 0..n_blocks {
            let name_len = cursor.read_u32()? as usize;
            let name = String::from_utf8(cursor.read_bytes(name_len)?.to_vec())
                .map_err(|e| SugerirError::model_load(format!("bad block name: {e}")))?;
            let value_count = cursor.read_u32()? as usize;
            let raw = cursor.read_bytes(value_count * 4)?;
            let values = raw
                .chunks_exact(4)
                .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect();
            blocks.insert(name, values);
        }

        Ok(Self { metadata, blocks })
    }

    /// The decoded metadata.
    #[must_use]
    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    /// A named block's values.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ModelLoad`] if the block is absent.
    pub fn block(&self, name: &str) -> Result<&[f32]> {
        self.blocks
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SugerirError::model_load(format!("missing block: {name}")))
    }
}

/// Bounds-checked little-endian reader over the payload body.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| SugerirError::model_load("payload truncated"))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

const fn build_crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                0xEDB8_8320 ^ (crc >> 1)
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC32 lookup table (IEEE polynomial).
const CRC32_TABLE: [u32; 256] = build_crc32_table();

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let idx = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = CRC32_TABLE[idx] ^ (crc >> 8);
    }
    !crc
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
