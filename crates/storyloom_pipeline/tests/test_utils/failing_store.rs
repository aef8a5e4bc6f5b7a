//! Blob store that fails on selected keys.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_interface::BlobStore;
use storyloom_storage::MemoryBlobStore;

/// Wraps a [`MemoryBlobStore`] and reports every key starting with one of
/// the configured prefixes as unavailable.
#[derive(Clone, Default)]
pub struct FailingStore {
    inner: MemoryBlobStore,
    prefixes: Arc<Mutex<Vec<String>>>,
}

impl FailingStore {
    /// Store over `inner` with no failures configured.
    pub fn new(inner: MemoryBlobStore) -> Self {
        Self {
            inner,
            prefixes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every access to keys starting with `prefix`.
    pub fn fail_prefix(&self, prefix: impl Into<String>) {
        self.prefixes.lock().unwrap().push(prefix.into());
    }

    fn check(&self, path: &str) -> StoryloomResult<()> {
        let prefixes = self.prefixes.lock().unwrap();
        if prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            return Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                "injected outage for {}",
                path
            )))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn exists(&self, path: &str) -> StoryloomResult<bool> {
        self.check(path)?;
        self.inner.exists(path).await
    }

    async fn read_text(&self, path: &str) -> StoryloomResult<String> {
        self.check(path)?;
        self.inner.read_text(path).await
    }

    async fn write_content(
        &self,
        path: &str,
        content: &str,
        content_type: &str,
    ) -> StoryloomResult<()> {
        self.check(path)?;
        self.inner.write_content(path, content, content_type).await
    }
}
