//! Shared test data.

use serde_json::json;
use storyloom_core::{ErrorLogEntry, RunDate, Severity};
use storyloom_interface::BlobStore;
use storyloom_storage::MemoryBlobStore;

/// Monday of ISO week 26, 2025.
pub fn date() -> RunDate {
    RunDate::parse("2025-06-23").unwrap()
}

/// A well-formed model reply with the given story and prompts.
pub fn reply(story: &str, prompts: &[&str]) -> String {
    let mut text = format!(
        "###STORY:\n{}\n\n###SUMMARY:\nA short and gentle day.\n\n###PROMPTS:\n",
        story
    );
    for prompt in prompts {
        text.push_str("- ");
        text.push_str(prompt);
        text.push('\n');
    }
    text
}

/// Schedule `characters` (id, theme title) on [`date`].
pub async fn seed_themes(store: &MemoryBlobStore, characters: &[(&str, &str)]) {
    let entries: Vec<_> = characters
        .iter()
        .map(|(id, title)| json!({"character_id": id, "theme": {"title": title}}))
        .collect();
    let mut document = serde_json::Map::new();
    document.insert(date().to_string(), serde_json::Value::Array(entries));
    store
        .write_json(
            "themes/2025/06_W26_theme.json",
            &serde_json::Value::Object(document),
        )
        .await
        .unwrap();
}

/// Store a character profile with `name`.
pub async fn seed_profile(store: &MemoryBlobStore, character_id: &str, name: &str) {
    store
        .write_json(
            &format!("characters/data/{}.json", character_id),
            &json!({"name": name, "species": "test"}),
        )
        .await
        .unwrap();
}

/// Every entry of the day's activity log.
pub async fn activity_entries(store: &MemoryBlobStore) -> Vec<ErrorLogEntry> {
    match store.get("logs/errors/2025-06-23_error.json").await {
        Some(text) => serde_json::from_str(&text).unwrap(),
        None => Vec::new(),
    }
}

/// Only the warnings of the day's activity log.
pub async fn warnings(store: &MemoryBlobStore) -> Vec<ErrorLogEntry> {
    activity_entries(store)
        .await
        .into_iter()
        .filter(|entry| entry.severity == Severity::Warning)
        .collect()
}
