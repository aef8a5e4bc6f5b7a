//! HTTP error types.

/// Transport-level HTTP failure (connection refused, TLS, timeout).
///
/// Non-2xx replies from a provider are reported through
/// [`ModelsErrorKind::Api`](crate::ModelsErrorKind::Api) instead, so callers can
/// tell "could not reach" apart from "reached and was refused".
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Request URL, with query string removed
    pub url: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            url: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the request URL. Query parameters are stripped so API keys
    /// passed as `?key=` never end up in logs.
    pub fn with_url(mut self, url: &str) -> Self {
        let base = url.split('?').next().unwrap_or(url);
        self.url = Some(base.to_string());
        self
    }
}
