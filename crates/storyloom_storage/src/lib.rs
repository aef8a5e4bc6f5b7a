//! Blob storage backends for Storyloom.
//!
//! Every backend implements [`BlobStore`] over slash-separated keys such as
//! `logs/errors/2025-06-23_error.json`.
//!
//! - [`FileSystemBlobStore`] maps keys onto files under a root directory
//! - [`MemoryBlobStore`] keeps everything in a map, for tests and dry runs
//! - [`GcsBlobStore`] talks to a Google Cloud Storage (Firebase) bucket
//!
//! [`LockedBlobStore`] wraps any of them and serializes access per key so
//! concurrent read-modify-write sequences cannot lose updates.
//!
//! # Example
//!
//! ```rust
//! use storyloom_storage::{BlobStore, MemoryBlobStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryBlobStore::new();
//! store.append_text("characters/fox/2025/2025_W26.txt", "# Weekly log file initialized\n").await?;
//! store.append_text("characters/fox/2025/2025_W26.txt", "=== day one ===\n").await?;
//!
//! let text = store.read_text("characters/fox/2025/2025_W26.txt").await?;
//! assert!(text.ends_with("=== day one ===\n"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod gcs;
mod key;
mod locked;
mod memory;

pub use filesystem::FileSystemBlobStore;
pub use gcs::{GcsBlobStore, GcsConfig};
pub use key::validate_key;
pub use locked::LockedBlobStore;
pub use memory::MemoryBlobStore;
pub use storyloom_error::{StorageError, StorageErrorKind};
pub use storyloom_interface::BlobStore;
