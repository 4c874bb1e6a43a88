//! V1/V2 card layout detection.

use std::fmt;

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use crate::metadata::nullable;
use crate::{CardMetadata, Error, Result};

/// `spec_version` value identifying a V2 envelope.
pub const SPEC_VERSION_V2: &str = "2.0";

/// Card layout a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardVersion {
    /// Flat object.
    V1,
    /// `spec_version` envelope with the fields under `data`.
    V2,
}

impl fmt::Display for CardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardVersion::V1 => f.write_str("v1"),
            CardVersion::V2 => f.write_str("v2"),
        }
    }
}

/// A decoded card, tagged with the layout it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CardSchema {
    V1(CardMetadata),
    V2(CardMetadata),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "nullable")]
    spec_version: String,
    #[serde(default, deserialize_with = "nullable")]
    data: CardMetadata,
}

impl CardSchema {
    /// Decode card JSON.
    ///
    /// The input must be a JSON object. It is first read as a V2 envelope.
    /// Only an envelope whose `spec_version` is exactly `"2.0"` and whose
    /// `data` is an object (or absent) is taken as V2; anything else is
    /// re-read as a flat V1 object. Duplicate keys resolve to the last one.
    pub fn parse(json: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(json).map_err(Error::InvalidMetadataSchema)?;
        let Value::Object(fields) = &value else {
            return Err(Error::InvalidMetadataSchema(serde_json::Error::custom(
                "card data is not a JSON object",
            )));
        };

        // Structs also deserialize from arrays, by position
        let data_is_record = matches!(
            fields.get("data"),
            None | Some(Value::Null) | Some(Value::Object(_))
        );
        if data_is_record {
            if let Ok(envelope) = Envelope::deserialize(&value) {
                if envelope.spec_version == SPEC_VERSION_V2 {
                    return Ok(CardSchema::V2(envelope.data));
                }
            }
        }

        CardMetadata::deserialize(&value)
            .map(CardSchema::V1)
            .map_err(Error::InvalidMetadataSchema)
    }

    /// Layout the card was read from.
    pub fn version(&self) -> CardVersion {
        match self {
            CardSchema::V1(_) => CardVersion::V1,
            CardSchema::V2(_) => CardVersion::V2,
        }
    }

    /// Borrow the normalized fields.
    pub fn metadata(&self) -> &CardMetadata {
        match self {
            CardSchema::V1(metadata) | CardSchema::V2(metadata) => metadata,
        }
    }

    /// Take the normalized fields.
    pub fn into_metadata(self) -> CardMetadata {
        match self {
            CardSchema::V1(metadata) | CardSchema::V2(metadata) => metadata,
        }
    }
}
