//! Key/value blob storage.

use async_trait::async_trait;
use storyloom_error::{JsonError, StoryloomResult};

/// Content type attached to narrative and other text blobs.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Content type attached to JSON documents.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Remote object storage addressed by slash-separated keys.
///
/// Backends implement the three primitives; the text and JSON helpers are
/// built on top of them. None of the helpers are atomic across calls, so
/// concurrent read-modify-write sequences must be serialized by the caller.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Whether a blob exists at `path`.
    async fn exists(&self, path: &str) -> StoryloomResult<bool>;

    /// Full text of the blob at `path`.
    ///
    /// Fails with `StorageErrorKind::NotFound` when there is no such blob.
    async fn read_text(&self, path: &str) -> StoryloomResult<String>;

    /// Replace the blob at `path` with `content`.
    async fn write_content(
        &self,
        path: &str,
        content: &str,
        content_type: &str,
    ) -> StoryloomResult<()>;

    /// Replace the blob at `path` with plain text.
    async fn write_text(&self, path: &str, content: &str) -> StoryloomResult<()> {
        self.write_content(path, content, CONTENT_TYPE_TEXT).await
    }

    /// Append `content` to the blob at `path`, creating it when absent.
    async fn append_text(&self, path: &str, content: &str) -> StoryloomResult<()> {
        let existing = match self.read_text(path).await {
            Ok(text) => text,
            Err(e) if e.is_not_found() => String::new(),
            Err(e) => return Err(e),
        };
        self.write_text(path, &format!("{}{}", existing, content))
            .await
    }

    /// Parse the blob at `path` as JSON.
    ///
    /// An absent or blank blob reads as an empty object.
    async fn read_json(&self, path: &str) -> StoryloomResult<serde_json::Value> {
        let text = match self.read_text(path).await {
            Ok(text) => text,
            Err(e) if e.is_not_found() => {
                tracing::debug!(path, "Blob absent, reading as empty object");
                return Ok(serde_json::Value::Object(serde_json::Map::new()));
            }
            Err(e) => return Err(e),
        };
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| JsonError::at_path(path, e.to_string()).into())
    }

    /// Write `value` as pretty-printed JSON.
    async fn write_json(&self, path: &str, value: &serde_json::Value) -> StoryloomResult<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| JsonError::at_path(path, e.to_string()))?;
        self.write_content(path, &text, CONTENT_TYPE_JSON).await
    }
}
