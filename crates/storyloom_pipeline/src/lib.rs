//! The Storyloom daily illustrated-story pipeline.
//!
//! A run for one date reads the week's theme document, selects the
//! characters scheduled that day, prepares their work items, then for each
//! character writes a story with the language model and illustrates its
//! prompts. Every artifact lands in blob storage under keys derived from
//! the date, so a rerun resumes where the previous run stopped.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storyloom_pipeline::{DailyPipeline, RunControl};
//!
//! let pipeline = DailyPipeline::new(store, driver, generator, uploader);
//! let outcome = pipeline.run(date, &RunControl::default()).await;
//! assert!(outcome.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod extraction;
mod images;
mod paths;
mod prompt;
mod record;
mod render;
mod report;
mod runner;
mod selector;
mod story;
mod work_items;

pub use activity::ActivityLog;
pub use extraction::{
    PROMPTS_MARKER, STORY_MARKER, SUMMARY_MARKER, extract_between, extract_list_after,
    parse_story_reply,
};
pub use images::{ImageStep, image_name};
pub use paths::{
    error_log_key, log_record_key, memory_key, narrative_key, profile_key, theme_key,
    today_paths_key, weekly_narrative_key,
};
pub use prompt::{SYSTEM_PROMPT, StoryPrompt, build_story_prompt, build_user_prompt, word_count};
pub use render::{
    BLOCK_RULE, NARRATIVE_HEADER, block_header, publish_block, render_block, upsert_block, wrap,
};
pub use report::{CharacterReport, Outcome, RunReport, StepStatus};
pub use runner::{CancelFlag, DailyPipeline, PipelineOptions, PipelineOptionsBuilder, RunControl};
pub use selector::{Selection, select_characters};
pub use story::StoryStep;
pub use work_items::build_work_items;
