//! JSON error types.

/// JSON serialization/deserialization error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} ({}) at line {} in {}", message, path, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Storage key of the document that failed, or `<inline>`
    pub path: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for an in-memory value.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::JsonError;
    ///
    /// let err = JsonError::new("Invalid JSON syntax");
    /// assert!(err.message.contains("Invalid JSON"));
    /// assert_eq!(err.path, "<inline>");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at_path("<inline>", message)
    }

    /// Create a new JsonError for the document stored at `path`.
    ///
    /// ```
    /// use storyloom_error::JsonError;
    ///
    /// let err = JsonError::at_path("logs/errors/2025-06-23_error.json", "expected array");
    /// assert!(err.to_string().contains("2025-06-23_error.json"));
    /// ```
    #[track_caller]
    pub fn at_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: path.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
