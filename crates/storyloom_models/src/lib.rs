//! Chat, image generation and image hosting clients for Storyloom.
//!
//! - [`OpenAICompatibleClient`] speaks the OpenAI chat completions format
//!   and is used against OpenRouter for story generation
//! - [`OpenAIImageClient`] calls an OpenAI-compatible `images/generations`
//!   endpoint and decodes the returned image
//! - [`ImgBbUploader`] publishes images to ImgBB and returns their URL
//!
//! Each client implements the matching trait from `storyloom_interface`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod images;
mod openai_compat;

pub use images::{
    DEFAULT_IMGBB_UPLOAD_URL, ImageGenerationRequest, ImageGenerationResponse, ImgBbUploader,
    OpenAIImageClient,
};
pub use openai_compat::{
    ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, DEFAULT_OPENROUTER_URL,
    OpenAICompatibleClient,
};
