//! Documents written by earlier pipeline versions still decode.

use serde_json::json;
use storyloom_core::{
    ErrorLogEntry, LogRecord, RunDate, Severity, ThemeDocument, TodayManifest,
};

#[test]
fn test_setup_era_log_record_decodes() {
    let record: LogRecord = serde_json::from_value(json!({
        "date": "2025-06-23",
        "character": "rabbit_chef",
        "theme": "creative_cooking",
        "story": "",
        "summary": "",
        "prompt_list": [],
        "model_story": "",
        "duration": 0.0
    }))
    .unwrap();

    assert_eq!(record.date, RunDate::parse("2025-06-23").unwrap());
    assert_eq!(record.theme_slug, "creative_cooking");
    assert!(record.images.is_empty());
    assert_eq!(record.token_count, 0);
}

#[test]
fn test_story_era_log_record_decodes() {
    let record: LogRecord = serde_json::from_value(json!({
        "date": "2025-06-23",
        "character": "rabbit_chef",
        "theme": "creative_cooking",
        "story": "Once upon a time",
        "summary": "A rabbit cooks.",
        "prompt_list": ["a rabbit in a kitchen"],
        "model_story": "deepseek/deepseek-r1-0528:free",
        "tokens_story": 187,
        "duration": 12.5,
        "images": ["https://i.ibb.co/x/1.jpg"]
    }))
    .unwrap();

    assert!(record.has_story());
    assert!(record.images_complete());
    assert_eq!(record.model_name, "deepseek/deepseek-r1-0528:free");
    assert_eq!(record.token_count, 187);
}

#[test]
fn test_legacy_manifest_fills_ids_from_keys() {
    let manifest = TodayManifest::from_value(json!({
        "rabbit_chef": {
            "theme": "creative_cooking",
            "log": "logs/characters/rabbit_chef/2025-06-23_creative_cooking_log.json",
            "txt": "characters/rabbit_chef/2025/2025_W26.txt"
        },
        "owl": {
            "theme": "rain",
            "log": "logs/characters/owl/2025-06-23_rain_log.json",
            "txt": "characters/owl/2025/2025_W26.txt"
        }
    }))
    .unwrap();

    let ids: Vec<&str> = manifest.items().map(|i| i.character_id().as_str()).collect();
    assert_eq!(ids, vec!["owl", "rabbit_chef"]);
}

#[test]
fn test_legacy_error_log_decodes() {
    let entries: Vec<ErrorLogEntry> = serde_json::from_value(json!([
        {"timestamp": "2025-06-23T08:00:00", "type": "OK", "message": "started"},
        {"timestamp": "2025-06-23T08:00:01", "type": "info", "message": "memo"},
        {"timestamp": "2025-06-23T08:00:02", "type": "error", "message": "failed"}
    ]))
    .unwrap();

    let severities: Vec<Severity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Info, Severity::Info, Severity::Error]
    );
}

#[test]
fn test_theme_document_with_mixed_theme_shapes() {
    let doc = ThemeDocument::from_value(json!({
        "2025-06-23": [
            {"character_id": "rabbit_chef", "theme": {"title": "Sharing & Friendship!"}},
            {"character_id": "owl", "theme": "  "}
        ]
    }))
    .unwrap();

    let entries = doc.entries_for(RunDate::parse("2025-06-23").unwrap()).unwrap();
    assert_eq!(entries[0].theme.slug(), "sharing_friendship");
    assert_eq!(entries[1].theme.slug(), "unknown");
}
