//! PNG chunk structures.

use std::fmt;

use cardex_common::big_endian::U32;
use cardex_common::memchr::memchr;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Four-character chunk type tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Image header.
    pub const IHDR: Self = Self(*b"IHDR");
    /// Image data.
    pub const IDAT: Self = Self(*b"IDAT");
    /// Image trailer, always the last chunk.
    pub const IEND: Self = Self(*b"IEND");
    /// Uncompressed Latin-1 text.
    pub const TEXT: Self = Self(*b"tEXt");

    /// Raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '?' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({})", self)
    }
}

/// On-disk chunk header: payload length followed by the type tag.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ChunkHeader {
    /// Payload length in bytes.
    pub length: U32,
    /// Chunk type.
    pub chunk_type: ChunkType,
}

impl ChunkHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    /// Size of the trailing CRC in bytes.
    pub const CRC_SIZE: usize = 4;

    /// Create a header for a payload of the given length.
    pub fn new(chunk_type: ChunkType, length: u32) -> Self {
        Self {
            length: U32::new(length),
            chunk_type,
        }
    }
}

/// A single PNG chunk borrowed from its source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Chunk type tag.
    pub chunk_type: ChunkType,
    /// Raw payload.
    pub data: &'a [u8],
    /// CRC as stored in the file. Never recomputed.
    pub crc: u32,
}

impl<'a> Chunk<'a> {
    /// Create a chunk from its parts.
    pub fn new(chunk_type: ChunkType, data: &'a [u8], crc: u32) -> Self {
        Self {
            chunk_type,
            data,
            crc,
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if this is a `tEXt` chunk.
    pub fn is_text(&self) -> bool {
        self.chunk_type == ChunkType::TEXT
    }

    /// Check if this is the `IEND` trailer.
    pub fn is_end(&self) -> bool {
        self.chunk_type == ChunkType::IEND
    }

    /// Split a `tEXt` payload into keyword and text at the first null byte.
    ///
    /// Returns `None` for other chunk types and for text payloads without a
    /// separator.
    pub fn text(&self) -> Option<TextChunk<'a>> {
        if !self.is_text() {
            return None;
        }

        let split = memchr(0, self.data)?;
        Some(TextChunk {
            keyword: &self.data[..split],
            text: &self.data[split + 1..],
        })
    }
}

/// Keyword and text of a `tEXt` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// Keyword, without the null separator.
    pub keyword: &'a [u8],
    /// Text following the separator.
    pub text: &'a [u8],
}

impl TextChunk<'_> {
    /// Keyword as a string, lossily decoded.
    pub fn keyword_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.keyword)
    }
}
