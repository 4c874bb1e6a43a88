//! Character card fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Card fields shared by the V1 and V2 layouts.
///
/// Every field is optional in the wild. Missing and `null` fields both
/// deserialize to the empty value, and unknown fields are ignored. The
/// `char_*`, `world_scenario` and `example_dialogue` fields come from older
/// front-ends and are only consulted as fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardMetadata {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub personality: String,
    #[serde(deserialize_with = "nullable")]
    pub scenario: String,
    /// Opening message.
    #[serde(deserialize_with = "nullable")]
    pub first_mes: String,
    /// Example dialogue.
    #[serde(deserialize_with = "nullable")]
    pub mes_example: String,
    #[serde(deserialize_with = "nullable")]
    pub creator_notes: String,
    #[serde(deserialize_with = "nullable")]
    pub system_prompt: String,
    #[serde(deserialize_with = "nullable")]
    pub post_history_instructions: String,
    /// Alternate opening messages. Usually strings, kept loose.
    #[serde(deserialize_with = "nullable")]
    pub alternate_greetings: Vec<Value>,
    /// Embedded lorebook.
    pub character_book: Option<Value>,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub creator: String,
    #[serde(deserialize_with = "nullable")]
    pub character_version: String,
    /// Explicit avatar, usually a URL or data URI. `"none"` means unset.
    #[serde(deserialize_with = "nullable")]
    pub avatar: String,
    #[serde(deserialize_with = "nullable")]
    pub chat: String,
    #[serde(deserialize_with = "nullable")]
    pub create_date: String,
    /// Front-end specific data, kept as-is.
    #[serde(deserialize_with = "nullable")]
    pub extensions: Map<String, Value>,

    #[serde(deserialize_with = "nullable")]
    pub char_name: String,
    #[serde(deserialize_with = "nullable")]
    pub char_persona: String,
    #[serde(deserialize_with = "nullable")]
    pub char_greeting: String,
    #[serde(deserialize_with = "nullable")]
    pub world_scenario: String,
    #[serde(deserialize_with = "nullable")]
    pub example_dialogue: String,
}

impl CardMetadata {
    /// Name, falling back to the legacy `char_name`.
    pub fn display_name(&self) -> &str {
        or_legacy(&self.name, &self.char_name)
    }

    /// Opening message, falling back to the legacy `char_greeting`.
    pub fn greeting(&self) -> &str {
        or_legacy(&self.first_mes, &self.char_greeting)
    }

    /// Personality, falling back to the legacy `char_persona`.
    pub fn persona(&self) -> &str {
        or_legacy(&self.personality, &self.char_persona)
    }

    /// Scenario, falling back to the legacy `world_scenario`.
    pub fn world(&self) -> &str {
        or_legacy(&self.scenario, &self.world_scenario)
    }

    /// Example dialogue, falling back to the legacy `example_dialogue`.
    pub fn examples(&self) -> &str {
        or_legacy(&self.mes_example, &self.example_dialogue)
    }

    /// Look up a top-level extension value.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// `extensions.fav`, false when missing or not a boolean.
    pub fn is_favorite(&self) -> bool {
        self.extension("fav")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// `extensions.talkativeness`.
    pub fn talkativeness(&self) -> Option<&str> {
        self.extension("talkativeness").and_then(Value::as_str)
    }

    /// `extensions.chub.full_path`.
    pub fn chub_full_path(&self) -> Option<&str> {
        self.extension("chub")?.get("full_path")?.as_str()
    }
}

fn or_legacy<'a>(primary: &'a str, legacy: &'a str) -> &'a str {
    if primary.is_empty() {
        legacy
    } else {
        primary
    }
}

/// Deserialize `null` as the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
