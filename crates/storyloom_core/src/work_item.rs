//! Per-character work items and the daily manifest that lists them.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storyloom_error::{PipelineError, PipelineErrorKind, StoryloomResult};

/// Everything later steps need to find one character's blobs for the day.
///
/// ```
/// use storyloom_core::WorkItem;
///
/// let item: WorkItem = serde_json::from_str(
///     r#"{"theme": "creative_cooking", "log": "logs/a.json", "txt": "characters/a.txt"}"#,
/// )
/// .unwrap();
/// assert_eq!(item.theme_slug(), "creative_cooking");
/// assert_eq!(item.narrative_path(), "characters/a.txt");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct WorkItem {
    /// Character the item belongs to
    #[serde(default)]
    character_id: String,
    /// Slug of the day's theme
    #[serde(alias = "theme")]
    theme_slug: String,
    /// Key of the day's log record
    #[serde(alias = "log")]
    log_path: String,
    /// Key of the character's weekly narrative
    #[serde(alias = "txt")]
    narrative_path: String,
}

impl WorkItem {
    /// Assemble a work item from already resolved keys.
    pub fn new(
        character_id: impl Into<String>,
        theme_slug: impl Into<String>,
        log_path: impl Into<String>,
        narrative_path: impl Into<String>,
    ) -> Self {
        Self {
            character_id: character_id.into(),
            theme_slug: theme_slug.into(),
            log_path: log_path.into(),
            narrative_path: narrative_path.into(),
        }
    }
}

/// Contents of `logs/today_paths/{year-month}/{date}.json`, keyed by
/// character id.
///
/// # Examples
///
/// ```
/// use storyloom_core::TodayManifest;
///
/// let manifest = TodayManifest::from_value(serde_json::json!({
///     "rabbit_chef": {"theme": "creative_cooking", "log": "l.json", "txt": "n.txt"}
/// }))
/// .unwrap();
///
/// let item = manifest.get("rabbit_chef").unwrap();
/// assert_eq!(item.character_id(), "rabbit_chef");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodayManifest(BTreeMap<String, WorkItem>);

impl TodayManifest {
    /// Decode a stored manifest. Items missing `character_id` take it from
    /// their key.
    #[track_caller]
    pub fn from_value(value: serde_json::Value) -> StoryloomResult<Self> {
        let mut items: BTreeMap<String, WorkItem> = serde_json::from_value(value).map_err(|e| {
            PipelineError::new(PipelineErrorKind::InvalidManifest(e.to_string()))
        })?;
        for (key, item) in items.iter_mut() {
            if item.character_id.is_empty() {
                item.character_id = key.clone();
            }
        }
        Ok(Self(items))
    }

    /// Encode for storage.
    #[track_caller]
    pub fn to_value(&self) -> StoryloomResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            PipelineError::new(PipelineErrorKind::InvalidManifest(e.to_string())).into()
        })
    }

    /// Item for `character_id`, if present.
    pub fn get(&self, character_id: &str) -> Option<&WorkItem> {
        self.0.get(character_id)
    }

    /// Add or replace the item keyed by its character id.
    pub fn insert(&mut self, item: WorkItem) {
        self.0.insert(item.character_id.clone(), item);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nobody is scheduled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items ordered by character id.
    pub fn items(&self) -> impl Iterator<Item = &WorkItem> {
        self.0.values()
    }
}

impl FromIterator<WorkItem> for TodayManifest {
    fn from_iter<I: IntoIterator<Item = WorkItem>>(iter: I) -> Self {
        let mut manifest = Self::default();
        for item in iter {
            manifest.insert(item);
        }
        manifest
    }
}
