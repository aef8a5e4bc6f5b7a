//! Wire types for image generation and hosting.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of an OpenAI-compatible `images/generations` request.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageGenerationRequest {
    /// Model identifier
    model: String,
    /// Visual prompt
    prompt: String,
    /// Number of images, always one here
    #[builder(default = "1")]
    n: u32,
    /// Image size such as `1024x1024`
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    /// `b64_json` or `url`
    #[builder(default = "\"b64_json\".to_string()")]
    response_format: String,
}

impl ImageGenerationRequest {
    /// Creates a new builder for ImageGenerationRequest.
    pub fn builder() -> ImageGenerationRequestBuilder {
        ImageGenerationRequestBuilder::default()
    }
}

/// One generated image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDatum {
    /// Base64 image bytes
    #[serde(default)]
    pub b64_json: Option<String>,
    /// Temporary download URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of an `images/generations` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    /// Generated images; empty when the provider refused the prompt
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}

/// The `data` object of an ImgBB upload response.
#[derive(Debug, Clone, Deserialize)]
pub struct ImgBbData {
    /// Public URL of the uploaded image
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of an ImgBB upload response.
#[derive(Debug, Clone, Deserialize)]
pub struct ImgBbResponse {
    /// Uploaded image details
    #[serde(default)]
    pub data: Option<ImgBbData>,
    /// Whether the upload succeeded
    #[serde(default)]
    pub success: bool,
}
