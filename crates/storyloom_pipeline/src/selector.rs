//! Which characters appear today, and with what theme.

use std::collections::BTreeMap;
use storyloom_core::{RunDate, ThemeDocument};
use storyloom_error::StoryloomResult;

use crate::activity::ActivityLog;

/// Character id to theme slug for one day.
pub type Selection = BTreeMap<String, String>;

/// Resolve the characters scheduled for `date`.
///
/// A date with no entries is not an error: the selection is empty and one
/// warning is written to the activity log. When a character is listed
/// twice for the same day the first listing wins.
#[tracing::instrument(skip_all, fields(date = %date))]
pub async fn select_characters(
    document: &ThemeDocument,
    date: RunDate,
    activity: &ActivityLog,
) -> StoryloomResult<Selection> {
    let mut selection = Selection::new();
    for entry in document.entries_for(date)? {
        let character_id = entry.character_id.trim().to_string();
        if selection.contains_key(&character_id) {
            tracing::debug!(character_id = %character_id, "Duplicate theme entry ignored");
            continue;
        }
        selection.insert(character_id, entry.theme.slug());
    }

    if selection.is_empty() {
        activity
            .warning(format!("No characters scheduled for {}", date))
            .await;
    } else {
        tracing::info!(count = selection.len(), "Characters selected");
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use storyloom_storage::{LockedBlobStore, MemoryBlobStore};

    fn activity(memory: &Arc<MemoryBlobStore>, date: RunDate) -> ActivityLog {
        ActivityLog::new(LockedBlobStore::new(memory.clone()), date, 8)
    }

    #[tokio::test]
    async fn test_slugs_theme_titles() {
        let date = RunDate::parse("2025-06-23").unwrap();
        let document = ThemeDocument::from_value(json!({
            "2025-06-23": [
                {"character_id": "rabbit_chef", "theme": {"title": "Sharing & Friendship!", "mood": "warm"}},
                {"character_id": "owl", "theme": "Rainy Day"},
                {"character_id": "fox"}
            ]
        }))
        .unwrap();
        let memory = Arc::new(MemoryBlobStore::new());

        let selection = select_characters(&document, date, &activity(&memory, date))
            .await
            .unwrap();

        assert_eq!(selection["rabbit_chef"], "sharing_friendship");
        assert_eq!(selection["owl"], "rainy_day");
        assert_eq!(selection["fox"], "unknown");
        assert!(memory.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_unscheduled_date_warns_once() {
        let date = RunDate::parse("2025-06-24").unwrap();
        let document = ThemeDocument::from_value(json!({
            "2025-06-23": [{"character_id": "fox", "theme": "Rain"}]
        }))
        .unwrap();
        let memory = Arc::new(MemoryBlobStore::new());

        let selection = select_characters(&document, date, &activity(&memory, date))
            .await
            .unwrap();

        assert!(selection.is_empty());
        assert_eq!(memory.keys().await, vec!["logs/errors/2025-06-24_error.json".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_character_id_is_malformed() {
        let date = RunDate::parse("2025-06-23").unwrap();
        let document = ThemeDocument::from_value(json!({
            "2025-06-23": [{"character_id": "  ", "theme": "Rain"}]
        }))
        .unwrap();
        let memory = Arc::new(MemoryBlobStore::new());

        let result = select_characters(&document, date, &activity(&memory, date)).await;
        assert!(result.is_err());
    }
}
