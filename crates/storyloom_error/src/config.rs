//! Configuration error types.

/// Configuration error with source location.
///
/// Raised while loading `storyloom.toml` layers or when a required secret is
/// missing from the environment. Either condition aborts the run before any
/// storage is touched.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Configuration key or environment variable involved, if known
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse storyloom.toml");
    /// assert!(err.message.contains("storyloom.toml"));
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for a required environment variable that is unset or blank.
    ///
    /// ```
    /// use storyloom_error::ConfigError;
    ///
    /// let err = ConfigError::missing_env("IMG_BB_API_KEY");
    /// assert_eq!(err.key.as_deref(), Some("IMG_BB_API_KEY"));
    /// assert!(err.to_string().contains("IMG_BB_API_KEY"));
    /// ```
    #[track_caller]
    pub fn missing_env(var: &str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: format!("Environment variable {} is not set", var),
            key: Some(var.to_string()),
            line: location.line(),
            file: location.file(),
        }
    }
}
