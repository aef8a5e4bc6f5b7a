//! Parsing of the model's structured story reply.
//!
//! The system prompt asks for exactly this shape:
//!
//! ```text
//! ###STORY:
//! ...
//! ###SUMMARY:
//! ...
//! ###PROMPTS:
//! - prompt one
//! - prompt two
//! ```

use storyloom_core::StoryParts;
use storyloom_error::{PipelineError, PipelineErrorKind, StoryloomResult};

/// Marker that opens the story section.
pub const STORY_MARKER: &str = "###STORY:";
/// Marker that opens the summary section.
pub const SUMMARY_MARKER: &str = "###SUMMARY:";
/// Marker that opens the prompt list.
pub const PROMPTS_MARKER: &str = "###PROMPTS:";

/// Text between the first `start` marker and the first `end` marker after
/// it, trimmed.
///
/// Returns an empty string when either marker is missing or `end` only
/// occurs before `start`.
///
/// ```
/// use storyloom_pipeline::extract_between;
///
/// let reply = "###STORY:\n  Once upon a time.\n###SUMMARY:\nShort.";
/// assert_eq!(extract_between(reply, "###STORY:", "###SUMMARY:"), "Once upon a time.");
/// assert_eq!(extract_between(reply, "###SUMMARY:", "###STORY:"), "");
/// assert_eq!(extract_between(reply, "###STORY:", "###PROMPTS:"), "");
/// ```
pub fn extract_between(text: &str, start: &str, end: &str) -> String {
    let Some(start_at) = text.find(start) else {
        return String::new();
    };
    let rest = &text[start_at + start.len()..];
    match rest.find(end) {
        Some(end_at) => rest[..end_at].trim().to_string(),
        None => String::new(),
    }
}

/// Bulleted `- item` lines following `marker`, up to the next `###`
/// section or the end of the text.
///
/// ```
/// use storyloom_pipeline::extract_list_after;
///
/// let prompts = extract_list_after("###PROMPTS:\n- a\n- b\nnotaprompt", "###PROMPTS:");
/// assert_eq!(prompts, vec!["a", "b"]);
/// ```
pub fn extract_list_after(text: &str, marker: &str) -> Vec<String> {
    let Some(start_at) = text.find(marker) else {
        return Vec::new();
    };
    text[start_at + marker.len()..]
        .lines()
        .map(str::trim_start)
        .take_while(|line| !line.starts_with("###"))
        .filter_map(|line| line.strip_prefix("- "))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a model reply into story, summary and prompts.
///
/// # Errors
///
/// - `EmptyReply` when the reply is blank
/// - `MissingMarker` when any of the three markers is absent
/// - `MarkersOutOfOrder` when they do not appear as STORY, SUMMARY, PROMPTS
/// - `EmptySection` when the story or summary holds no text
/// - `NoPrompts` when the prompt section holds no `- ` lines
#[track_caller]
pub fn parse_story_reply(text: &str) -> StoryloomResult<StoryParts> {
    if text.trim().is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::EmptyReply).into());
    }

    let mut positions = Vec::with_capacity(3);
    for marker in [STORY_MARKER, SUMMARY_MARKER, PROMPTS_MARKER] {
        match text.find(marker) {
            Some(at) => positions.push(at),
            None => {
                return Err(
                    PipelineError::new(PipelineErrorKind::MissingMarker(marker.to_string()))
                        .into(),
                );
            }
        }
    }
    if !positions.is_sorted() {
        return Err(PipelineError::new(PipelineErrorKind::MarkersOutOfOrder).into());
    }

    let story = extract_between(text, STORY_MARKER, SUMMARY_MARKER);
    if story.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::EmptySection("STORY".to_string())).into());
    }
    let summary = extract_between(text, SUMMARY_MARKER, PROMPTS_MARKER);
    if summary.is_empty() {
        return Err(
            PipelineError::new(PipelineErrorKind::EmptySection("SUMMARY".to_string())).into(),
        );
    }
    let prompt_list = extract_list_after(text, PROMPTS_MARKER);
    if prompt_list.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::NoPrompts).into());
    }

    Ok(StoryParts {
        story,
        summary,
        prompt_list,
    })
}
