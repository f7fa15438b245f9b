//! Binary encoding of trie segments.
//!
//! A segment blob is a fixed header followed by a gzip-compressed bincode
//! payload holding the [`TrieNode`] reached by the segment's first letter:
//!
//! ```text
//! +--------+---------+-----------+-------------+------------------------+
//! | "LXSG" | version | letter    | crc32       | gzip(bincode(TrieNode)) |
//! | 4 B    | u8      | u32 LE    | u32 LE      | ...                    |
//! +--------+---------+-----------+-------------+------------------------+
//! ```
//!
//! The checksum covers the compressed payload. Every structural problem is
//! reported as [`LexicombError::Segment`]; a blob is never partially trusted.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{LexicombError, Result};
use crate::trie::node::TrieNode;

pub const SEGMENT_MAGIC: &[u8; 4] = b"LXSG";
pub const SEGMENT_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 4 + 1 + 4 + 4;

/// Encode the subtree of `letter` into a segment blob.
pub fn encode_segment(letter: char, node: &TrieNode) -> Result<Vec<u8>> {
    let raw = bincode::serialize(node)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    let payload = encoder.finish()?;

    let mut blob = Vec::with_capacity(HEADER_LEN + payload.len());
    blob.extend_from_slice(SEGMENT_MAGIC);
    blob.write_u8(SEGMENT_VERSION)?;
    blob.write_u32::<LittleEndian>(letter as u32)?;
    blob.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    blob.extend_from_slice(&payload);
    Ok(blob)
}

/// Decode a segment blob that is expected to hold the subtree of `letter`.
pub fn decode_segment(letter: char, blob: &[u8]) -> Result<TrieNode> {
    if blob.len() < HEADER_LEN {
        return Err(LexicombError::segment(format!(
            "segment '{letter}' is truncated ({} bytes)",
            blob.len()
        )));
    }

    let mut header = Cursor::new(&blob[..HEADER_LEN]);
    let mut magic = [0u8; 4];
    header.read_exact(&mut magic)?;
    if &magic != SEGMENT_MAGIC {
        return Err(LexicombError::segment(format!("segment '{letter}' has bad magic")));
    }

    let version = header.read_u8()?;
    if version != SEGMENT_VERSION {
        return Err(LexicombError::segment(format!(
            "segment '{letter}' has unsupported version {version}"
        )));
    }

    let stored_letter = header.read_u32::<LittleEndian>()?;
    if stored_letter != letter as u32 {
        let found = char::from_u32(stored_letter).unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(LexicombError::segment(format!(
            "segment for '{letter}' holds letter '{found}'"
        )));
    }

    let checksum = header.read_u32::<LittleEndian>()?;
    let payload = &blob[HEADER_LEN..];
    if crc32fast::hash(payload) != checksum {
        return Err(LexicombError::segment(format!(
            "segment '{letter}' failed checksum verification"
        )));
    }

    let mut raw = Vec::new();
    GzDecoder::new(payload)
        .read_to_end(&mut raw)
        .map_err(|e| LexicombError::segment(format!("segment '{letter}' decompression failed: {e}")))?;

    bincode::deserialize(&raw)
        .map_err(|e| LexicombError::segment(format!("segment '{letter}' decoding failed: {e}")))
}
