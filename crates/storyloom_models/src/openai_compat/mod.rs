//! OpenAI-compatible chat completions.
//!
//! OpenRouter, Groq, DeepSeek and most self-hosted gateways accept this
//! format, so the same client covers all of them.

mod client;
mod conversions;
mod dto;

pub use client::{DEFAULT_OPENROUTER_URL, OpenAICompatibleClient};
pub use dto::{ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse};
