//! Request and response types for story generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Provider-neutral chat generation request.
///
/// # Examples
///
/// ```
/// use storyloom_core::{GenerateRequestBuilder, Message};
///
/// let request = GenerateRequestBuilder::default()
///     .messages(vec![Message::system("Be kind."), Message::user("Hello")])
///     .max_tokens(Some(2048))
///     .temperature(Some(1.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.model, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Conversation so far, system turn first
    pub messages: Vec<Message>,
    /// Completion token ceiling
    #[builder(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    pub temperature: Option<f32>,
    /// Overrides the client's configured model
    #[builder(default)]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Concatenated text of every message, in order, with no separator.
    pub fn prompt_text(&self) -> String {
        self.messages.iter().map(|m| m.content.as_str()).collect()
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u64,
    /// Tokens produced by the model
    pub completion_tokens: u64,
}

/// What the language model sent back.
///
/// ```
/// use storyloom_core::GenerateResponse;
///
/// let response = GenerateResponse::new("###STORY:\nOnce...", Some("deepseek/deepseek-r1".into()));
/// assert!(response.text().starts_with("###STORY:"));
/// assert_eq!(response.model_name(), "deepseek/deepseek-r1");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Text outputs, one per returned choice
    pub outputs: Vec<String>,
    /// Model that actually served the request
    pub model: Option<String>,
    /// Token accounting, when the provider reports it
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Response with a single text output.
    pub fn new(text: impl Into<String>, model: Option<String>) -> Self {
        Self {
            outputs: vec![text.into()],
            model,
            usage: None,
        }
    }

    /// Text of the first output, or `""` when the provider returned nothing.
    pub fn text(&self) -> &str {
        self.outputs.first().map(String::as_str).unwrap_or_default()
    }

    /// Served model name, or `""` when unreported.
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or_default()
    }
}
