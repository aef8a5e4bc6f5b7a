//! Weekly theme documents.

use crate::{RunDate, theme_slug};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storyloom_error::{PipelineError, PipelineErrorKind, StoryloomResult};

/// Theme assigned to a character for one day.
///
/// Stored either as a bare title string or as an object with a `title`
/// and any number of descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeSpec {
    /// `"theme": "Creative Cooking"`
    Plain(String),
    /// `"theme": {"title": "Creative Cooking", ...}`
    Detailed {
        /// Human readable theme title
        #[serde(default)]
        title: Option<String>,
        /// Remaining descriptive fields
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
}

impl Default for ThemeSpec {
    fn default() -> Self {
        Self::Detailed {
            title: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl ThemeSpec {
    /// The theme title, if one was given.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Plain(title) => Some(title),
            Self::Detailed { title, .. } => title.as_deref(),
        }
    }

    /// Slug of the title, `unknown` when it has none.
    pub fn slug(&self) -> String {
        theme_slug(self.title())
    }
}

/// One scheduled character for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeEntry {
    /// Character the theme applies to
    #[serde(default)]
    pub character_id: String,
    /// The theme itself
    #[serde(default)]
    pub theme: ThemeSpec,
}

/// Contents of `themes/{year}/{month}_{week}_theme.json`.
///
/// Maps `YYYY-MM-DD` date strings to the characters scheduled that day.
///
/// # Examples
///
/// ```
/// use storyloom_core::{RunDate, ThemeDocument};
///
/// let doc = ThemeDocument::from_value(serde_json::json!({
///     "2025-06-23": [
///         {"character_id": "rabbit_chef", "theme": {"title": "Creative Cooking", "mood": "warm"}},
///         {"character_id": "owl_librarian", "theme": "Rainy Day"}
///     ]
/// }))
/// .unwrap();
///
/// let entries = doc.entries_for(RunDate::parse("2025-06-23").unwrap()).unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].theme.slug(), "creative_cooking");
/// assert_eq!(entries[1].theme.slug(), "rainy_day");
///
/// let nothing = doc.entries_for(RunDate::parse("2025-06-24").unwrap()).unwrap();
/// assert!(nothing.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeDocument(BTreeMap<String, Vec<ThemeEntry>>);

impl ThemeDocument {
    /// Decode a theme document, failing on anything that is not a map of
    /// date strings to entry arrays.
    #[track_caller]
    pub fn from_value(value: serde_json::Value) -> StoryloomResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            PipelineError::new(PipelineErrorKind::InvalidThemeDocument(e.to_string())).into()
        })
    }

    /// Entries scheduled for `date`, empty when the date is absent.
    ///
    /// An entry without a character id makes the whole day unusable.
    #[track_caller]
    pub fn entries_for(&self, date: RunDate) -> StoryloomResult<&[ThemeEntry]> {
        let Some(entries) = self.0.get(&date.to_string()) else {
            return Ok(&[]);
        };
        if let Some(position) = entries
            .iter()
            .position(|entry| entry.character_id.trim().is_empty())
        {
            return Err(PipelineError::new(PipelineErrorKind::InvalidThemeDocument(format!(
                "entry {} for {} has no character_id",
                position, date
            )))
            .into());
        }
        Ok(entries)
    }

    /// Dates the document schedules, in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> RunDate {
        RunDate::parse("2025-06-23").unwrap()
    }

    #[test]
    fn test_missing_title_is_unknown() {
        let doc = ThemeDocument::from_value(json!({
            "2025-06-23": [{"character_id": "fox", "theme": {"mood": "sleepy"}}]
        }))
        .unwrap();
        let entries = doc.entries_for(date()).unwrap();
        assert_eq!(entries[0].theme.slug(), "unknown");
    }

    #[test]
    fn test_missing_theme_is_unknown() {
        let doc = ThemeDocument::from_value(json!({
            "2025-06-23": [{"character_id": "fox"}]
        }))
        .unwrap();
        assert_eq!(doc.entries_for(date()).unwrap()[0].theme.slug(), "unknown");
    }

    #[test]
    fn test_empty_character_id_rejected() {
        let doc = ThemeDocument::from_value(json!({
            "2025-06-23": [{"character_id": "  ", "theme": "Rain"}]
        }))
        .unwrap();
        assert!(doc.entries_for(date()).is_err());
    }

    #[test]
    fn test_bad_shape_rejected() {
        assert!(ThemeDocument::from_value(json!({"2025-06-23": "rabbit"})).is_err());
        assert!(ThemeDocument::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_empty_object_is_empty_document() {
        let doc = ThemeDocument::from_value(json!({})).unwrap();
        assert_eq!(doc.dates().count(), 0);
        assert!(doc.entries_for(date()).unwrap().is_empty());
    }
}
