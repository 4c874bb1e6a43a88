//! Chunk extraction.

use cardex_common::BinaryReader;

use crate::{Chunk, ChunkHeader, Error, Result, PNG_SIGNATURE};

/// Check if data starts with the PNG signature.
pub fn is_png(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() && &data[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Extract all chunks from a PNG buffer, in file order.
///
/// Extraction stops after the `IEND` chunk; any trailing bytes are ignored.
/// A buffer that ends cleanly on a chunk boundary without `IEND` is accepted
/// and yields the chunks read so far. Only truncation inside a chunk is an
/// error.
pub fn extract_chunks(data: &[u8]) -> Result<Vec<Chunk<'_>>> {
    let mut reader = BinaryReader::new(data);
    reader
        .expect_magic(PNG_SIGNATURE)
        .map_err(|_| Error::NotAnImage)?;

    let mut chunks = Vec::new();

    while !reader.is_empty() {
        let offset = reader.position();
        let available = reader.remaining();

        let header: ChunkHeader = reader
            .read_struct()
            .map_err(|_| Error::TruncatedChunkHeader { offset, available })?;

        let length = header.length.get() as usize;
        let needed = length.saturating_add(ChunkHeader::CRC_SIZE);
        let available = reader.remaining();
        let body = reader
            .read_bytes(needed)
            .map_err(|_| Error::TruncatedChunkPayload {
                chunk_type: header.chunk_type,
                offset,
                needed,
                available,
            })?;

        let (payload, crc) = body.split_at(length);
        let crc = u32::from_be_bytes([crc[0], crc[1], crc[2], crc[3]]);

        let chunk = Chunk::new(header.chunk_type, payload, crc);
        let is_end = chunk.is_end();
        chunks.push(chunk);

        if is_end {
            break;
        }
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode_chunks, ChunkType};

    fn sample() -> Vec<u8> {
        encode_chunks(&[
            Chunk::new(ChunkType::IHDR, &[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0], 0x1F15C489),
            Chunk::new(ChunkType::IDAT, b"pixels", 0xDEADBEEF),
            Chunk::new(ChunkType::IEND, &[], 0xAE426082),
        ])
    }

    #[test]
    fn test_is_png() {
        assert!(is_png(&sample()));
        assert!(!is_png(b"not a PNG"));
        assert!(!is_png(&PNG_SIGNATURE[..7]));
    }

    #[test]
    fn test_not_an_image() {
        assert!(matches!(extract_chunks(b"not a PNG"), Err(Error::NotAnImage)));
        assert!(matches!(extract_chunks(b""), Err(Error::NotAnImage)));
        assert!(matches!(
            extract_chunks(&PNG_SIGNATURE[..4]),
            Err(Error::NotAnImage)
        ));
    }

    #[test]
    fn test_extract_in_order() {
        let data = sample();
        let chunks = extract_chunks(&data).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chunk_type, ChunkType::IHDR);
        assert_eq!(chunks[0].crc, 0x1F15C489);
        assert_eq!(chunks[1].data, b"pixels");
        assert_eq!(chunks[1].crc, 0xDEADBEEF);
        assert!(chunks[2].is_end());
    }

    #[test]
    fn test_signature_only() {
        let chunks = extract_chunks(PNG_SIGNATURE).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_stops_at_iend() {
        let mut data = sample();
        data.extend_from_slice(b"trailing garbage that is not a chunk");

        let chunks = extract_chunks(&data).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.last().unwrap().is_end());
    }

    #[test]
    fn test_missing_iend_is_accepted() {
        let data = encode_chunks(&[
            Chunk::new(ChunkType::IHDR, b"header", 1),
            Chunk::new(ChunkType::IDAT, b"data", 2),
        ]);

        let chunks = extract_chunks(&data).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].chunk_type, ChunkType::IDAT);
    }

    #[test]
    fn test_truncated_header() {
        let mut data = sample();
        // Drop IEND and leave 5 bytes of a new header
        data.truncate(data.len() - 12);
        data.extend_from_slice(&[0, 0, 0, 0, b'I']);

        assert!(matches!(
            extract_chunks(&data),
            Err(Error::TruncatedChunkHeader { available: 5, .. })
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let data = sample();
        // IHDR payload starts after signature + header
        let cut = PNG_SIGNATURE.len() + ChunkHeader::SIZE + 3;

        match extract_chunks(&data[..cut]) {
            Err(Error::TruncatedChunkPayload {
                chunk_type,
                offset,
                needed,
                available,
            }) => {
                assert_eq!(chunk_type, ChunkType::IHDR);
                assert_eq!(offset, PNG_SIGNATURE.len());
                assert_eq!(needed, 13 + 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected TruncatedChunkPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_crc_is_truncation() {
        let data = sample();
        let cut = PNG_SIGNATURE.len() + ChunkHeader::SIZE + 13 + 2;

        assert!(matches!(
            extract_chunks(&data[..cut]),
            Err(Error::TruncatedChunkPayload { .. })
        ));
    }

    #[test]
    fn test_huge_declared_length() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&u32::MAX.to_be_bytes());
        data.extend_from_slice(b"IDAT");
        data.extend_from_slice(b"short");

        assert!(matches!(
            extract_chunks(&data),
            Err(Error::TruncatedChunkPayload { .. })
        ));
    }
}
