//! Common utilities for Cardex.
//!
//! This crate provides foundational types used across the Cardex crates:
//!
//! - [`BinaryReader`] - Zero-copy big-endian reading from byte slices
//! - [`Error`] - Shared error type for bounds and magic checks

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits and big-endian integer types for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
pub use zerocopy::byteorder::big_endian;

/// Re-export memchr for SIMD-accelerated byte searching
pub use memchr;
