//! Per-key mutual exclusion over any blob store.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::sync::Arc;
use storyloom_error::{JsonError, StoryloomResult};
use storyloom_interface::{BlobStore, CONTENT_TYPE_JSON};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::instrument;

/// Wraps a [`BlobStore`] so that every write and every read-modify-write
/// on a given key happens one at a time.
///
/// Different keys never block each other. The lock table only grows; a
/// daily run touches a few dozen keys.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use storyloom_storage::{LockedBlobStore, MemoryBlobStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LockedBlobStore::new(Arc::new(MemoryBlobStore::new()));
///
/// let counter: u32 = store
///     .update_json("counter.json", |current: Option<u32>| Ok(current.unwrap_or(0) + 1))
///     .await?;
/// assert_eq!(counter, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LockedBlobStore {
    inner: Arc<dyn BlobStore>,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl std::fmt::Debug for LockedBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockedBlobStore")
            .field("backend", &self.inner.backend_name())
            .finish()
    }
}

impl LockedBlobStore {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn BlobStore>) -> Self {
        Self {
            inner,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The unlocked store underneath.
    pub fn inner(&self) -> &Arc<dyn BlobStore> {
        &self.inner
    }

    /// Hold the lock for `path` until the guard is dropped.
    pub async fn lock(&self, path: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut locks = self.locks.lock().await;
            locks.entry(path.to_string()).or_default().clone()
        };
        slot.lock_owned().await
    }

    async fn read_optional(&self, path: &str) -> StoryloomResult<Option<String>> {
        match self.inner.read_text(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read the text at `path`, transform it, and write the result back,
    /// all under the key's lock.
    ///
    /// `apply` receives `None` when the blob does not exist. If it returns
    /// an error nothing is written.
    #[instrument(skip(self, apply))]
    pub async fn update_text<F>(&self, path: &str, apply: F) -> StoryloomResult<()>
    where
        F: FnOnce(Option<String>) -> StoryloomResult<String> + Send,
    {
        let _guard = self.lock(path).await;
        let current = self.read_optional(path).await?;
        let updated = apply(current)?;
        self.inner.write_text(path, &updated).await
    }

    /// Decode the JSON document at `path`, transform it, and write it back,
    /// all under the key's lock. Returns the value that was written.
    ///
    /// `apply` receives `None` when the blob is absent or blank. A document
    /// that does not decode as `T` is reported as a `JsonError` and left
    /// untouched.
    #[instrument(skip(self, apply))]
    pub async fn update_json<T, F>(&self, path: &str, apply: F) -> StoryloomResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce(Option<T>) -> StoryloomResult<T> + Send,
    {
        let _guard = self.lock(path).await;
        let current = match self.read_optional(path).await? {
            Some(text) if !text.trim().is_empty() => Some(
                serde_json::from_str::<T>(&text)
                    .map_err(|e| JsonError::at_path(path, e.to_string()))?,
            ),
            _ => None,
        };
        let updated = apply(current)?;
        let text = serde_json::to_string_pretty(&updated)
            .map_err(|e| JsonError::at_path(path, e.to_string()))?;
        self.inner
            .write_content(path, &text, CONTENT_TYPE_JSON)
            .await?;
        Ok(updated)
    }
}

#[async_trait]
impl BlobStore for LockedBlobStore {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    async fn exists(&self, path: &str) -> StoryloomResult<bool> {
        self.inner.exists(path).await
    }

    async fn read_text(&self, path: &str) -> StoryloomResult<String> {
        let _guard = self.lock(path).await;
        self.inner.read_text(path).await
    }

    async fn write_content(
        &self,
        path: &str,
        content: &str,
        content_type: &str,
    ) -> StoryloomResult<()> {
        let _guard = self.lock(path).await;
        self.inner.write_content(path, content, content_type).await
    }

    async fn append_text(&self, path: &str, content: &str) -> StoryloomResult<()> {
        let _guard = self.lock(path).await;
        self.inner.append_text(path, content).await
    }

    async fn read_json(&self, path: &str) -> StoryloomResult<serde_json::Value> {
        let _guard = self.lock(path).await;
        self.inner.read_json(path).await
    }
}
