//! PNG chunk extraction and reassembly.
//!
//! Character cards are ordinary PNG images with the card JSON stored in a
//! `tEXt` chunk. This crate walks the chunk stream of a PNG buffer and can
//! serialize a chunk list back into a standalone PNG.
//!
//! # File Format
//!
//! - 8 bytes: Signature (`\x89PNG\r\n\x1a\n`)
//! - Repeated chunks, each:
//!   - 4 bytes: Payload length (big-endian)
//!   - 4 bytes: Chunk type (ASCII, e.g. `IHDR`, `IDAT`, `tEXt`, `IEND`)
//!   - N bytes: Payload
//!   - 4 bytes: CRC-32 of type and payload (big-endian)
//!
//! Parsing stops after the `IEND` chunk. CRCs are carried through as stored
//! and never verified.
//!
//! # Example
//!
//! ```no_run
//! use cardex_png::{encode_chunks, extract_chunks};
//!
//! let data = std::fs::read("card.png")?;
//! let chunks = extract_chunks(&data)?;
//!
//! for chunk in &chunks {
//!     println!("{} ({} bytes)", chunk.chunk_type, chunk.len());
//! }
//!
//! let image_only: Vec<_> = chunks.into_iter().filter(|c| !c.is_text()).collect();
//! std::fs::write("image.png", encode_chunks(&image_only))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chunk;
mod encode;
mod error;
mod extract;

pub use chunk::{Chunk, ChunkHeader, ChunkType, TextChunk};
pub use encode::{encode_chunks, encoded_len};
pub use error::{Error, Result};
pub use extract::{extract_chunks, is_png};

/// PNG file signature.
pub const PNG_SIGNATURE: &[u8; 8] = &[137, 80, 78, 71, 13, 10, 26, 10];
