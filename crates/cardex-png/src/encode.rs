//! Chunk serialization.

use zerocopy::IntoBytes;

use crate::{Chunk, ChunkHeader, PNG_SIGNATURE};

/// Total size in bytes of the PNG produced by [`encode_chunks`].
pub fn encoded_len(chunks: &[Chunk<'_>]) -> usize {
    chunks.iter().fold(PNG_SIGNATURE.len(), |size, chunk| {
        size + ChunkHeader::SIZE + chunk.len() + ChunkHeader::CRC_SIZE
    })
}

/// Serialize chunks into a standalone PNG, signature first.
///
/// Each chunk is written with its stored CRC; nothing is recomputed, so the
/// output is only as valid as the chunks it was given.
pub fn encode_chunks(chunks: &[Chunk<'_>]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(chunks));
    bytes.extend_from_slice(PNG_SIGNATURE);

    for chunk in chunks {
        let header = ChunkHeader::new(chunk.chunk_type, chunk.len() as u32);
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(chunk.data);
        bytes.extend_from_slice(&chunk.crc.to_be_bytes());
    }

    bytes
}
