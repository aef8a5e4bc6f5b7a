//! Daily pipeline error types.

/// Specific error conditions raised by the daily pipeline itself, as opposed
/// to the collaborators it drives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// A section marker is absent from the model reply
    #[display("Reply is missing section marker '{}'", _0)]
    MissingMarker(String),
    /// Section markers appear, but not in STORY, SUMMARY, PROMPTS order
    #[display("Reply section markers are out of order")]
    MarkersOutOfOrder,
    /// The prompts section holds no `- ` lines
    #[display("Reply contains no image prompts")]
    NoPrompts,
    /// A section marker is present but the section holds no text
    #[display("Reply section '{}' is empty", _0)]
    EmptySection(String),
    /// The model returned no text at all
    #[display("Model reply is empty")]
    EmptyReply,
    /// Theme document cannot be used for the requested date
    #[display("Invalid theme document: {}", _0)]
    InvalidThemeDocument(String),
    /// Today-paths manifest is structurally invalid
    #[display("Invalid work-item manifest: {}", _0)]
    InvalidManifest(String),
    /// A log record could not be decoded or violates its invariants
    #[display("Invalid log record at {}: {}", path, reason)]
    InvalidRecord {
        /// Storage key of the record
        path: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use storyloom_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::NoPrompts);
/// assert!(format!("{}", err).contains("no image prompts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
