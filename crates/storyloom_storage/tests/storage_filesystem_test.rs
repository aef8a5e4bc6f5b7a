//! Tests for the filesystem blob store.

use serde_json::json;
use storyloom_error::{StorageErrorKind, StoryloomErrorKind};
use storyloom_storage::{BlobStore, FileSystemBlobStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_write_and_read_nested_key() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemBlobStore::new(temp_dir.path()).unwrap();

    let key = "logs/characters/rabbit_chef/2025-06-23_creative_cooking_log.json";
    store.write_text(key, "hello").await.unwrap();

    assert!(store.exists(key).await.unwrap());
    assert_eq!(store.read_text(key).await.unwrap(), "hello");

    let on_disk = temp_dir
        .path()
        .join("logs/characters/rabbit_chef/2025-06-23_creative_cooking_log.json");
    assert!(on_disk.exists());
}

#[tokio::test]
async fn test_missing_blob_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemBlobStore::new(temp_dir.path()).unwrap();

    assert!(!store.exists("themes/2025/06_W26_theme.json").await.unwrap());

    let err = store
        .read_text("themes/2025/06_W26_theme.json")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err.kind(), StoryloomErrorKind::Storage(_)));
}

#[tokio::test]
async fn test_overwrite_leaves_no_temp_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemBlobStore::new(temp_dir.path()).unwrap();

    store.write_json("a/doc.json", &json!({"v": 1})).await.unwrap();
    store.write_json("a/doc.json", &json!({"v": 2})).await.unwrap();

    let names: Vec<String> = std::fs::read_dir(temp_dir.path().join("a"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["doc.json".to_string()]);
    assert_eq!(store.read_json("a/doc.json").await.unwrap(), json!({"v": 2}));
}

#[tokio::test]
async fn test_sibling_temp_names_do_not_collide() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemBlobStore::new(temp_dir.path()).unwrap();

    let (a, b) = tokio::join!(
        store.write_text("w/2025_W26.txt", "narrative"),
        store.write_text("w/2025_W26.json", "{}"),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(store.read_text("w/2025_W26.txt").await.unwrap(), "narrative");
    assert_eq!(store.read_text("w/2025_W26.json").await.unwrap(), "{}");
}

#[tokio::test]
async fn test_append_text() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemBlobStore::new(temp_dir.path()).unwrap();

    store
        .append_text("characters/fox/2025/2025_W26.txt", "# Weekly log file initialized\n")
        .await
        .unwrap();
    store
        .append_text("characters/fox/2025/2025_W26.txt", "=== block ===\n")
        .await
        .unwrap();

    assert_eq!(
        store.read_text("characters/fox/2025/2025_W26.txt").await.unwrap(),
        "# Weekly log file initialized\n=== block ===\n"
    );
}

#[tokio::test]
async fn test_rejects_escaping_keys() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemBlobStore::new(temp_dir.path().join("root")).unwrap();

    let err = store.write_text("../outside.txt", "x").await.unwrap_err();
    assert!(matches!(
        err.storage_kind(),
        Some(StorageErrorKind::InvalidKey(_))
    ));
    assert!(!temp_dir.path().join("outside.txt").exists());
}
