//! Cardex - character card extraction library.
//!
//! This crate provides a unified interface to the Cardex crates for reading
//! character cards: persona metadata embedded as base64 JSON in PNG images.
//!
//! # Crates
//!
//! - [`cardex_common`] - Common utilities (big-endian binary reading)
//! - [`cardex_png`] - PNG chunk extraction and reassembly
//! - [`cardex_card`] - Card metadata decoding and V1/V2 resolution
//!
//! # Example
//!
//! ```no_run
//! use cardex::prelude::*;
//!
//! let data = std::fs::read("card.png")?;
//!
//! if is_png(&data) {
//!     let character = Character::from_bytes(&data)?;
//!     println!("{}: {}", character.name(), character.description());
//!
//!     // Write the card image without the embedded JSON
//!     std::fs::write("avatar.png", character.avatar_png())?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use cardex_card as card;
pub use cardex_common as common;
pub use cardex_png as png;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cardex_card::{CardMetadata, CardSchema, CardVersion, Character, ErrorKind};
    pub use cardex_common::BinaryReader;
    pub use cardex_png::{encode_chunks, extract_chunks, is_png, Chunk, ChunkType};
}

// Re-export commonly used types at the crate root
pub use cardex_card::{Character, Error, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
