//! Storage key validation shared by all backends.

use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};

/// Reject keys that cannot name a blob on every backend.
///
/// Keys are relative, slash separated, and may not contain empty, `.` or
/// `..` segments.
///
/// ```
/// use storyloom_storage::validate_key;
///
/// assert!(validate_key("logs/errors/2025-06-23_error.json").is_ok());
/// assert!(validate_key("/etc/passwd").is_err());
/// assert!(validate_key("logs/../secrets").is_err());
/// assert!(validate_key("").is_err());
/// ```
#[track_caller]
pub fn validate_key(path: &str) -> StoryloomResult<()> {
    let bad_segment = path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if path.trim().is_empty() || bad_segment || path.contains('\\') {
        return Err(StorageError::new(StorageErrorKind::InvalidKey(path.to_string())).into());
    }
    Ok(())
}
