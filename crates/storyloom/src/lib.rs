//! Storyloom - a daily illustrated-story pipeline.
//!
//! Every day Storyloom reads the week's theme document, writes one story per
//! scheduled character with a language model, illustrates the story's
//! prompts, hosts the images, and appends everything to per-character and
//! shared weekly narratives in blob storage.
//!
//! # Architecture
//!
//! - `storyloom_error` - Error types
//! - `storyloom_core` - Run date, theme, work item and log record types
//! - `storyloom_interface` - Storage, model and image service traits
//! - `storyloom_storage` - Filesystem, in-memory and Cloud Storage backends
//! - `storyloom_rate_limit` - Request pacing
//! - `storyloom_models` - OpenRouter, image generation and ImgBB clients
//! - `storyloom_pipeline` - The daily pipeline itself
//!
//! This crate re-exports the pieces a binary needs and adds configuration
//! loading and tracing setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{
    ImagesConfig, LlmConfig, LoggingConfig, RunConfig, Secrets, StorageBackend, StorageConfig,
    StoryloomConfig,
};
pub use observability::init_tracing;

pub use storyloom_core::{LogRecord, RunDate, TodayManifest, WorkItem};
pub use storyloom_error::{StoryloomError, StoryloomErrorKind, StoryloomResult};
pub use storyloom_interface::{BlobStore, ImageGenerator, ImageUploader, StoryDriver};
pub use storyloom_models::{ImgBbUploader, OpenAICompatibleClient, OpenAIImageClient};
pub use storyloom_pipeline::{
    CancelFlag, CharacterReport, DailyPipeline, Outcome, PipelineOptions, RunControl, RunReport,
    StepStatus,
};
pub use storyloom_rate_limit::RequestPacer;
pub use storyloom_storage::{FileSystemBlobStore, GcsBlobStore, GcsConfig, MemoryBlobStore};
