//! What a run did.

use derive_getters::Getters;
use serde::Serialize;

/// Result of one step for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum StepStatus {
    /// The step produced and persisted its output
    #[display("done")]
    Done,
    /// Nothing to do
    #[display("skipped ({})", _0)]
    Skipped(String),
    /// The step gave up on this character
    #[display("failed ({})", _0)]
    Failed(String),
}

impl StepStatus {
    /// True for [`StepStatus::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Both steps for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CharacterReport {
    character_id: String,
    story: StepStatus,
    images: StepStatus,
    images_uploaded: usize,
}

impl CharacterReport {
    /// Assemble a report.
    pub fn new(
        character_id: impl Into<String>,
        story: StepStatus,
        images: StepStatus,
        images_uploaded: usize,
    ) -> Self {
        Self {
            character_id: character_id.into(),
            story,
            images,
            images_uploaded,
        }
    }
}

/// Per-character results of a run, ordered by character id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    /// One entry per processed character
    pub characters: Vec<CharacterReport>,
}

impl RunReport {
    /// Report for `character_id`, if it was processed.
    pub fn character(&self, character_id: &str) -> Option<&CharacterReport> {
        self.characters
            .iter()
            .find(|report| report.character_id == character_id)
    }

    /// Total images uploaded across all characters.
    pub fn images_uploaded(&self) -> usize {
        self.characters.iter().map(|r| r.images_uploaded).sum()
    }

    /// Number of characters with at least one failed step.
    pub fn failures(&self) -> usize {
        self.characters
            .iter()
            .filter(|r| r.story.is_failed() || r.images.is_failed())
            .count()
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum Outcome {
    /// Every scheduled character was processed
    #[display("completed ({} characters)", _0.characters.len())]
    Completed(RunReport),
    /// The theme document schedules nobody for the date
    #[display("nothing scheduled")]
    NothingScheduled,
    /// Stopped early by cancellation or timeout
    #[display("cancelled after {} characters", _0.characters.len())]
    Cancelled(RunReport),
    /// A fatal error stopped the run
    #[display("failed: {}", _0)]
    Failed(String),
}

impl Outcome {
    /// True for outcomes that should exit successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::NothingScheduled)
    }

    /// Per-character results, when characters were processed.
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            Self::Completed(report) | Self::Cancelled(report) => Some(report),
            _ => None,
        }
    }
}
