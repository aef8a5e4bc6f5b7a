//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, ModelsError, PipelineError, StorageError};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryloomError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryloomErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Blob storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Daily pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Storyloom error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomError, StoryloomResult, ConfigError};
///
/// fn might_fail() -> StoryloomResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyloom Error: {}", _0)]
pub struct StoryloomError(Box<StoryloomErrorKind>);

impl StoryloomError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryloomErrorKind {
        &self.0
    }

    /// Returns the storage error kind if this error came from a blob store.
    pub fn storage_kind(&self) -> Option<&crate::StorageErrorKind> {
        match self.kind() {
            StoryloomErrorKind::Storage(err) => Some(&err.kind),
            _ => None,
        }
    }

    /// True when the error means the requested blob does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.storage_kind(),
            Some(crate::StorageErrorKind::NotFound(_))
        )
    }
}

// Generic From implementation for any type that converts to StoryloomErrorKind
impl<T> From<T> for StoryloomError
where
    T: Into<StoryloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyloom operations.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomResult, HttpError};
///
/// fn fetch_data() -> StoryloomResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type StoryloomResult<T> = std::result::Result<T, StoryloomError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageErrorKind;

    #[test]
    fn test_not_found_detection() {
        let err: StoryloomError =
            StorageError::new(StorageErrorKind::NotFound("themes/x.json".into())).into();
        assert!(err.is_not_found());

        let err: StoryloomError =
            StorageError::new(StorageErrorKind::Unavailable("offline".into())).into();
        assert!(!err.is_not_found());
        assert!(matches!(
            err.storage_kind(),
            Some(StorageErrorKind::Unavailable(_))
        ));
    }

    #[test]
    fn test_non_storage_error_has_no_storage_kind() {
        let err: StoryloomError = ConfigError::new("missing key").into();
        assert!(err.storage_kind().is_none());
        assert!(!err.is_not_found());
    }
}
