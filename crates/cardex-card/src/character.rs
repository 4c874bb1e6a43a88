//! Character card resolution.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::Engine;
use cardex_common::memchr::memchr2;
use cardex_png::{encode_chunks, extract_chunks, Chunk};

use crate::{CardMetadata, CardSchema, CardVersion, Error, Result};

/// `tEXt` keyword carrying the card payload.
pub const CHARA_KEYWORD: &str = "chara";

/// Prefix of the fallback avatar data URI.
pub const AVATAR_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Padded standard alphabet that ignores non-zero bits in the final symbol.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A parsed character card.
///
/// Holds the normalized card fields together with the card image, minus the
/// card payload, for use as an avatar.
#[derive(Debug, Clone)]
pub struct Character {
    metadata: CardMetadata,
    version: CardVersion,
    avatar_png: Vec<u8>,
    fallback_avatar: String,
}

impl Character {
    /// Read a character card from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a character card from PNG bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let chunks = extract_chunks(data)?;
        Self::from_chunks(&chunks)
    }

    /// Resolve a character card from already extracted chunks.
    ///
    /// The last `chara` text chunk wins. Every other chunk, including
    /// unrelated text chunks, is kept in order for the fallback avatar.
    pub fn from_chunks(chunks: &[Chunk<'_>]) -> Result<Self> {
        let mut payload = None;
        let mut image_chunks = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            match chunk.text() {
                Some(text) if text.keyword == CHARA_KEYWORD.as_bytes() => {
                    payload = Some(text.text)
                }
                _ => image_chunks.push(*chunk),
            }
        }

        let payload = payload.ok_or(Error::NoMetadataFound)?;
        let json = PAYLOAD_ENGINE.decode(strip_line_breaks(payload))?;
        let schema = CardSchema::parse(&json)?;

        let avatar_png = encode_chunks(&image_chunks);
        let fallback_avatar = format!("{}{}", AVATAR_DATA_URI_PREFIX, STANDARD.encode(&avatar_png));

        Ok(Self {
            version: schema.version(),
            metadata: schema.into_metadata(),
            avatar_png,
            fallback_avatar,
        })
    }

    /// Card name, falling back to the legacy `char_name` field.
    pub fn name(&self) -> &str {
        self.metadata.display_name()
    }

    /// Card description.
    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    /// Avatar to display.
    ///
    /// The card's own `avatar` field unless it is empty or `"none"`, else the
    /// reassembled image as a data URI.
    pub fn avatar(&self) -> &str {
        match self.metadata.avatar.as_str() {
            "" | "none" => &self.fallback_avatar,
            explicit => explicit,
        }
    }

    /// Check if [`avatar`](Self::avatar) comes from the card fields.
    pub fn has_explicit_avatar(&self) -> bool {
        !matches!(self.metadata.avatar.as_str(), "" | "none")
    }

    /// The reassembled image as a `data:image/png;base64,` URI.
    pub fn fallback_avatar(&self) -> &str {
        &self.fallback_avatar
    }

    /// The reassembled image as raw PNG bytes.
    pub fn avatar_png(&self) -> &[u8] {
        &self.avatar_png
    }

    /// All card fields.
    pub fn metadata(&self) -> &CardMetadata {
        &self.metadata
    }

    /// Layout the card was stored in.
    pub fn version(&self) -> CardVersion {
        self.version
    }

    /// Take the card fields.
    pub fn into_metadata(self) -> CardMetadata {
        self.metadata
    }
}

/// Drop CR and LF from wrapped base64 text.
fn strip_line_breaks(text: &[u8]) -> Cow<'_, [u8]> {
    if memchr2(b'\r', b'\n', text).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.iter()
            .copied()
            .filter(|&b| b != b'\r' && b != b'\n')
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use cardex_png::{ChunkHeader, ChunkType, PNG_SIGNATURE};

    const IHDR: &[u8] = &[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0];

    fn chara_payload(json: &str) -> Vec<u8> {
        let mut payload = b"chara\0".to_vec();
        payload.extend_from_slice(STANDARD.encode(json).as_bytes());
        payload
    }

    /// IHDR, the given text chunks, IDAT, IEND.
    fn card_png(texts: &[&[u8]]) -> Vec<u8> {
        let mut chunks = vec![Chunk::new(ChunkType::IHDR, IHDR, 0x1F15C489)];
        chunks.extend(texts.iter().map(|t| Chunk::new(ChunkType::TEXT, t, 0x11111111)));
        chunks.push(Chunk::new(ChunkType::IDAT, b"pixels", 0xDEADBEEF));
        chunks.push(Chunk::new(ChunkType::IEND, &[], 0xAE426082));
        encode_chunks(&chunks)
    }

    fn image_only_png() -> Vec<u8> {
        card_png(&[])
    }

    #[test]
    fn test_not_a_png() {
        let err = Character::from_bytes(b"not a PNG").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAnImage);
    }

    #[test]
    fn test_no_metadata() {
        let err = Character::from_bytes(&image_only_png()).unwrap_err();
        assert!(matches!(err, Error::NoMetadataFound));
    }

    #[test]
    fn test_other_text_keyword_is_not_metadata() {
        let data = card_png(&[b"Comment\0eyJuYW1lIjoiQWRhIn0="]);
        let err = Character::from_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMetadataFound);
    }

    #[test]
    fn test_v2_card() {
        let payload = chara_payload(r#"{"spec_version":"2.0","data":{"name":"Ada"}}"#);
        let character = Character::from_bytes(&card_png(&[&payload])).unwrap();

        assert_eq!(character.name(), "Ada");
        assert_eq!(character.version(), CardVersion::V2);
    }

    #[test]
    fn test_v1_card() {
        let payload = chara_payload(r#"{"name":"Ada","description":"Counts things"}"#);
        let character = Character::from_bytes(&card_png(&[&payload])).unwrap();

        assert_eq!(character.name(), "Ada");
        assert_eq!(character.description(), "Counts things");
        assert_eq!(character.version(), CardVersion::V1);
    }

    #[test]
    fn test_legacy_name() {
        let payload = chara_payload(r#"{"char_name":"Old Ada"}"#);
        let character = Character::from_bytes(&card_png(&[&payload])).unwrap();

        assert_eq!(character.name(), "Old Ada");
        assert_eq!(character.description(), "");
    }

    #[test]
    fn test_last_chara_wins() {
        let first = chara_payload(r#"{"name":"First"}"#);
        let second = chara_payload(r#"{"name":"Second"}"#);
        let character = Character::from_bytes(&card_png(&[&first, &second])).unwrap();

        assert_eq!(character.name(), "Second");
    }

    #[test]
    fn test_malformed_base64() {
        let data = card_png(&[b"chara\0!!not base64!!"]);
        let err = Character::from_bytes(&data).unwrap_err();

        assert!(matches!(err, Error::MalformedEncoding(_)));
    }

    #[test]
    fn test_trailing_bits_accepted() {
        // "e31=" is "{}" with the two spare bits of the last symbol set
        let data = card_png(&[b"chara\0e31="]);
        let character = Character::from_bytes(&data).unwrap();

        assert_eq!(character.version(), CardVersion::V1);
        assert_eq!(character.name(), "");
    }

    #[test]
    fn test_missing_padding_rejected() {
        let data = card_png(&[b"chara\0e30"]);
        let err = Character::from_bytes(&data).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn test_wrapped_base64() {
        let encoded = STANDARD.encode(r#"{"name":"Wrapped Ada"}"#);
        let (head, tail) = encoded.split_at(8);
        let payload = format!("chara\0{}\r\n{}\n", head, tail);

        let character = Character::from_bytes(&card_png(&[payload.as_bytes()])).unwrap();
        assert_eq!(character.name(), "Wrapped Ada");
    }

    #[test]
    fn test_invalid_schema() {
        let payload = chara_payload("[\"not\", \"an\", \"object\"]");
        let err = Character::from_bytes(&card_png(&[&payload])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidMetadataSchema);
    }

    #[test]
    fn test_truncated_payload() {
        let payload = chara_payload(r#"{"name":"Ada"}"#);
        let data = card_png(&[&payload]);
        let cut = PNG_SIGNATURE.len() + ChunkHeader::SIZE + 3;

        let err = Character::from_bytes(&data[..cut]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedChunkPayload);
    }

    #[test]
    fn test_fallback_avatar_strips_card() {
        let payload = chara_payload(r#"{"name":"Ada","avatar":"none"}"#);
        let data = card_png(&[b"Comment\0kept", &payload]);
        let character = Character::from_bytes(&data).unwrap();

        assert!(!character.has_explicit_avatar());
        assert_ne!(character.avatar(), "none");
        assert_eq!(character.avatar(), character.fallback_avatar());

        let encoded = character
            .avatar()
            .strip_prefix(AVATAR_DATA_URI_PREFIX)
            .unwrap();
        let png = STANDARD.decode(encoded).unwrap();
        assert_eq!(png, character.avatar_png());

        let original = extract_chunks(&data).unwrap();
        let expected: Vec<_> = original
            .iter()
            .filter(|c| c.data != payload.as_slice())
            .copied()
            .collect();
        let reassembled = extract_chunks(&png).unwrap();

        assert_eq!(&png[..8], PNG_SIGNATURE);
        assert_eq!(reassembled, expected);
        assert_eq!(reassembled.len(), 4);
        assert_eq!(reassembled[1].data, b"Comment\0kept");
    }

    #[test]
    fn test_missing_avatar_uses_fallback() {
        let payload = chara_payload(r#"{"name":"Ada"}"#);
        let character = Character::from_bytes(&card_png(&[&payload])).unwrap();

        assert!(character.avatar().starts_with(AVATAR_DATA_URI_PREFIX));
        assert_eq!(character.avatar_png(), image_only_png());
    }

    #[test]
    fn test_explicit_avatar() {
        let payload = chara_payload(r#"{"name":"Ada","avatar":"https://example.com/ada.png"}"#);
        let character = Character::from_bytes(&card_png(&[&payload])).unwrap();

        assert!(character.has_explicit_avatar());
        assert_eq!(character.avatar(), "https://example.com/ada.png");
        assert!(character.fallback_avatar().starts_with(AVATAR_DATA_URI_PREFIX));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Character::from_path("/nonexistent/cardex/card.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
