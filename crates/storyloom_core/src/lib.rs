//! Core data types for the Storyloom daily story pipeline.
//!
//! This crate provides the typed records shared by every Storyloom crate: the
//! run date, theme documents, work items, log records, activity log entries,
//! and the request/response types exchanged with the language model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod character;
mod date;
mod log_record;
mod media;
mod message;
mod request;
mod role;
mod slug;
mod theme;
mod work_item;

pub use activity::{ErrorLogEntry, Severity};
pub use character::CharacterProfile;
pub use date::RunDate;
pub use log_record::{LogRecord, StoryParts};
pub use media::GeneratedImage;
pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage};
pub use role::Role;
pub use slug::{UNKNOWN_SLUG, slugify, theme_slug};
pub use theme::{ThemeDocument, ThemeEntry, ThemeSpec};
pub use work_item::{TodayManifest, WorkItem, WorkItemBuilder};
