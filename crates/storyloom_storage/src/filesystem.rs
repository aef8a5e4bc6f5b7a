//! Filesystem blob store.
//!
//! Keys map directly onto paths under a root directory, so
//! `logs/errors/2025-06-23_error.json` lives at
//! `{root}/logs/errors/2025-06-23_error.json`. Writes go to a sibling
//! temporary file first and are renamed into place, so readers never see a
//! half-written document.

use crate::validate_key;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_interface::BlobStore;

/// Blob store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FileSystemBlobStore {
    root: PathBuf,
}

impl FileSystemBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryCreation` if the directory cannot be created.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> StoryloomResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(root = %root.display(), "Opened filesystem blob store");
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> StoryloomResult<PathBuf> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

#[async_trait]
impl BlobStore for FileSystemBlobStore {
    fn backend_name(&self) -> &'static str {
        "filesystem"
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, path: &str) -> StoryloomResult<bool> {
        let full = self.resolve(path)?;
        tokio::fs::try_exists(&full).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                full.display(),
                e
            )))
            .into()
        })
    }

    #[tracing::instrument(skip(self))]
    async fn read_text(&self, path: &str) -> StoryloomResult<String> {
        let full = self.resolve(path)?;
        let text = tokio::fs::read_to_string(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    full.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(path, size = text.len(), "Read blob");
        Ok(text)
    }

    #[tracing::instrument(skip(self, content), fields(size = content.len()))]
    async fn write_content(
        &self,
        path: &str,
        content: &str,
        content_type: &str,
    ) -> StoryloomResult<()> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp = Self::temp_path(&full);
        tokio::fs::write(&temp, content).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp, &full).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp.display(),
                full.display(),
                e
            )))
        })?;

        tracing::debug!(path, size = content.len(), "Wrote blob");
        Ok(())
    }
}
