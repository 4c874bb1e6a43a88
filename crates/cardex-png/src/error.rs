//! Error types for PNG chunk extraction.

use thiserror::Error;

use crate::ChunkType;

/// Errors that can occur when extracting PNG chunks.
#[derive(Debug, Error)]
pub enum Error {
    /// Input is shorter than the PNG signature or does not start with it.
    #[error("not a PNG file")]
    NotAnImage,

    /// Not enough bytes left for a chunk's length and type.
    #[error("incomplete PNG chunk header at offset {offset}: only {available} bytes left")]
    TruncatedChunkHeader { offset: usize, available: usize },

    /// Not enough bytes left for a chunk's declared payload and CRC.
    #[error(
        "incomplete PNG chunk data for {chunk_type} at offset {offset}: \
         needed {needed} bytes but only {available} available"
    )]
    TruncatedChunkPayload {
        chunk_type: ChunkType,
        offset: usize,
        needed: usize,
        available: usize,
    },
}

/// Result type for PNG chunk operations.
pub type Result<T> = std::result::Result<T, Error>;
