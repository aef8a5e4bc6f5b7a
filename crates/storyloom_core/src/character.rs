//! Character profile documents.

use serde::{Deserialize, Serialize};

/// Name used when a profile is missing or has no `name`.
const UNKNOWN_NAME: &str = "Unknown";

fn unknown_name() -> String {
    UNKNOWN_NAME.to_string()
}

/// Profile stored at `characters/data/{character_id}.json`.
///
/// Only `name` feeds the prompt; every other field is carried through
/// untouched.
///
/// ```
/// use storyloom_core::CharacterProfile;
///
/// let profile: CharacterProfile =
///     serde_json::from_str(r#"{"name": "Rabbit Chef", "species": "rabbit"}"#).unwrap();
/// assert_eq!(profile.name, "Rabbit Chef");
/// assert_eq!(profile.extra["species"], "rabbit");
///
/// let empty: CharacterProfile = serde_json::from_str("{}").unwrap();
/// assert_eq!(empty.name, "Unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Display name used in prompts
    #[serde(default = "unknown_name")]
    pub name: String,
    /// Remaining profile fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            name: unknown_name(),
            extra: serde_json::Map::new(),
        }
    }
}
