//! Error types for character card parsing.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when reading a character card.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading the card from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG chunk extraction error.
    #[error("{0}")]
    Png(#[from] cardex_png::Error),

    /// No `tEXt` chunk with the `chara` keyword.
    #[error("no character data found in PNG")]
    NoMetadataFound,

    /// Card payload is not valid base64.
    #[error("failed to decode base64 character data: {0}")]
    MalformedEncoding(#[from] base64::DecodeError),

    /// Decoded payload matches neither the V2 envelope nor the V1 layout.
    #[error("failed to parse character data: {0}")]
    InvalidMetadataSchema(#[source] serde_json::Error),
}

impl Error {
    /// Flat classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Png(cardex_png::Error::NotAnImage) => ErrorKind::NotAnImage,
            Error::Png(cardex_png::Error::TruncatedChunkHeader { .. }) => {
                ErrorKind::TruncatedChunkHeader
            }
            Error::Png(cardex_png::Error::TruncatedChunkPayload { .. }) => {
                ErrorKind::TruncatedChunkPayload
            }
            Error::NoMetadataFound => ErrorKind::NoMetadataFound,
            Error::MalformedEncoding(_) => ErrorKind::MalformedEncoding,
            Error::InvalidMetadataSchema(_) => ErrorKind::InvalidMetadataSchema,
        }
    }
}

/// Error classification, one variant per failure stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    NotAnImage,
    TruncatedChunkHeader,
    TruncatedChunkPayload,
    NoMetadataFound,
    MalformedEncoding,
    InvalidMetadataSchema,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Io => "io",
            ErrorKind::NotAnImage => "not-an-image",
            ErrorKind::TruncatedChunkHeader => "truncated-chunk-header",
            ErrorKind::TruncatedChunkPayload => "truncated-chunk-payload",
            ErrorKind::NoMetadataFound => "no-metadata",
            ErrorKind::MalformedEncoding => "malformed-encoding",
            ErrorKind::InvalidMetadataSchema => "invalid-schema",
        };
        f.write_str(name)
    }
}

/// Result type for character card operations.
pub type Result<T> = std::result::Result<T, Error>;
