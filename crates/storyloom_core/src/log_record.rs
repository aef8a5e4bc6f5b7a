//! Per-character daily log records.

use crate::RunDate;
use serde::{Deserialize, Serialize};

/// The three sections parsed out of a story reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryParts {
    /// Full story text
    pub story: String,
    /// One or two sentence overview
    pub summary: String,
    /// Image prompts, in reply order
    pub prompt_list: Vec<String>,
}

/// Contents of `logs/characters/{id}/{date}_{slug}_log.json`.
///
/// Fields written by earlier versions under other names (`character`,
/// `theme`, `model_story`, `tokens_story`, `duration`) are read
/// transparently. Fields this type does not know about are kept in
/// [`LogRecord::extra`] and written back unchanged.
///
/// # Examples
///
/// ```
/// use storyloom_core::{LogRecord, RunDate};
///
/// let legacy = r#"{
///     "date": "2025-06-23",
///     "character": "rabbit_chef",
///     "theme": "creative_cooking",
///     "story": "",
///     "summary": "",
///     "prompt_list": [],
///     "model_story": "",
///     "duration": 0.0,
///     "reviewed_by": "editor"
/// }"#;
/// let record: LogRecord = serde_json::from_str(legacy).unwrap();
/// assert_eq!(record.character_id, "rabbit_chef");
/// assert!(!record.has_story());
/// assert_eq!(record.extra["reviewed_by"], "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Day the record belongs to
    pub date: RunDate,
    /// Owning character
    #[serde(default, alias = "character")]
    pub character_id: String,
    /// Slug of the day's theme
    #[serde(default, alias = "theme")]
    pub theme_slug: String,
    /// Generated story, empty until the story step succeeds
    #[serde(default)]
    pub story: String,
    /// Generated summary
    #[serde(default)]
    pub summary: String,
    /// Generated image prompts
    #[serde(default)]
    pub prompt_list: Vec<String>,
    /// Model that wrote the story
    #[serde(default, alias = "model_story")]
    pub model_name: String,
    /// Whitespace word count of the prompt that produced the story
    #[serde(default, alias = "tokens_story")]
    pub token_count: u64,
    /// Wall-clock seconds the model call took
    #[serde(default, alias = "duration")]
    pub duration_seconds: f64,
    /// Hosted image URLs, in prompt order
    #[serde(default)]
    pub images: Vec<String>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Fresh record with no generated content.
    pub fn new_empty(
        date: RunDate,
        character_id: impl Into<String>,
        theme_slug: impl Into<String>,
    ) -> Self {
        Self {
            date,
            character_id: character_id.into(),
            theme_slug: theme_slug.into(),
            story: String::new(),
            summary: String::new(),
            prompt_list: Vec::new(),
            model_name: String::new(),
            token_count: 0,
            duration_seconds: 0.0,
            images: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// True once the story step has written a non-blank story.
    pub fn has_story(&self) -> bool {
        !self.story.trim().is_empty()
    }

    /// True when every prompt already has a hosted image.
    pub fn images_complete(&self) -> bool {
        !self.prompt_list.is_empty() && self.images.len() == self.prompt_list.len()
    }

    /// Merge a parsed story reply into the record.
    ///
    /// Images belong to the previous prompt list, so they are cleared.
    /// The duration is rounded to hundredths of a second.
    pub fn apply_story(
        &mut self,
        parts: StoryParts,
        model_name: impl Into<String>,
        token_count: u64,
        duration_seconds: f64,
    ) {
        self.story = parts.story;
        self.summary = parts.summary;
        self.prompt_list = parts.prompt_list;
        self.model_name = model_name.into();
        self.token_count = token_count;
        self.duration_seconds = (duration_seconds * 100.0).round() / 100.0;
        self.images.clear();
    }
}
