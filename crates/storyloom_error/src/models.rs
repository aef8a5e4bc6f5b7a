//! Model provider errors.

/// Provider-specific error conditions for the chat, image generation and
/// image hosting clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Request never completed (DNS, TLS, connection reset)
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Provider answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },

    /// Response body did not have the expected shape
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),

    /// Request DTO could not be assembled (derive_builder failures)
    #[display("Builder error: {}", _0)]
    Builder(String),

    /// Returned image payload could not be decoded
    #[display("Decode error: {}", _0)]
    Decode(String),
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::Api { status: 429, message: "slow down".into() });
/// assert!(err.to_string().contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
