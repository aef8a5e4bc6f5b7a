//! In-memory blob store.

use crate::validate_key;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_interface::BlobStore;
use tokio::sync::RwLock;

/// Blob store that lives entirely in memory.
///
/// Clones share the same contents, which lets a test keep a handle for
/// inspection after handing the store to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryBlobStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(key, content)` pairs.
    pub fn with_blobs<K, V>(blobs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let blobs = blobs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            blobs: Arc::new(RwLock::new(blobs)),
        }
    }

    /// Every key currently stored, sorted.
    pub async fn keys(&self) -> Vec<String> {
        self.blobs.read().await.keys().cloned().collect()
    }

    /// Content at `path`, if any.
    pub async fn get(&self, path: &str) -> Option<String> {
        self.blobs.read().await.get(path).cloned()
    }

    /// Full copy of the store contents.
    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.blobs.read().await.clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn exists(&self, path: &str) -> StoryloomResult<bool> {
        validate_key(path)?;
        Ok(self.blobs.read().await.contains_key(path))
    }

    async fn read_text(&self, path: &str) -> StoryloomResult<String> {
        validate_key(path)?;
        self.blobs
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(path.to_string())).into())
    }

    async fn write_content(
        &self,
        path: &str,
        content: &str,
        _content_type: &str,
    ) -> StoryloomResult<()> {
        validate_key(path)?;
        self.blobs
            .write()
            .await
            .insert(path.to_string(), content.to_string());
        Ok(())
    }
}
