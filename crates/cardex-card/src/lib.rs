//! Character card parser.
//!
//! A character card is a PNG image carrying a persona description as
//! base64-encoded JSON in a `tEXt` chunk with the keyword `chara`. Two JSON
//! shapes are in circulation:
//!
//! - **V1**: a flat object holding the card fields directly
//! - **V2**: an envelope `{"spec": ..., "spec_version": "2.0", "data": {...}}`
//!   with the card fields nested under `data`
//!
//! Both are normalized into a single [`CardMetadata`]. The image chunks left
//! after removing the card payload are reassembled into a standalone PNG,
//! used as the avatar when the card does not name one.
//!
//! # Example
//!
//! ```no_run
//! use cardex_card::Character;
//!
//! let character = Character::from_path("card.png")?;
//! println!("{} ({})", character.name(), character.version());
//! println!("{}", character.description());
//!
//! for tag in &character.metadata().tags {
//!     println!("#{}", tag);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod character;
mod error;
mod metadata;
mod schema;

pub use character::{Character, AVATAR_DATA_URI_PREFIX, CHARA_KEYWORD};
pub use error::{Error, ErrorKind, Result};
pub use metadata::CardMetadata;
pub use schema::{CardSchema, CardVersion, SPEC_VERSION_V2};
