//! Collaborator traits for the Storyloom daily story pipeline.
//!
//! The pipeline never talks to a concrete backend. Storage, the language
//! model, image generation and image hosting are all reached through the
//! traits defined here, so tests can swap any of them for a scripted fake.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blob;
mod traits;

pub use blob::{BlobStore, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
pub use traits::{ImageGenerator, ImageUploader, StoryDriver};
