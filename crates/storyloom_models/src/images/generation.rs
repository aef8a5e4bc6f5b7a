//! OpenAI-compatible image generation.

use crate::images::{ImageGenerationRequest, ImageGenerationResponse};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use storyloom_core::GeneratedImage;
use storyloom_error::{ModelsError, ModelsErrorKind, ModelsResult, StoryloomResult};
use storyloom_interface::ImageGenerator;
use tracing::{debug, error, instrument};

/// Client for an OpenAI-compatible `images/generations` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIImageClient {
    client: Client,
    api_key: String,
    model: String,
    url: String,
    size: Option<String>,
}

impl OpenAIImageClient {
    /// Creates a new image client posting to `url`.
    #[instrument(skip(api_key), fields(model = %model, url = %url))]
    pub fn new(api_key: String, model: String, url: String, size: Option<String>) -> Self {
        debug!(model = %model, url = %url, "Created image generation client");
        Self {
            client: Client::new(),
            api_key,
            model,
            url,
            size,
        }
    }

    /// Model requested for every prompt.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates one image for `prompt`.
    ///
    /// Returns `Ok(None)` when the provider answered without image data.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn render(&self, prompt: &str) -> ModelsResult<Option<GeneratedImage>> {
        let body = ImageGenerationRequest::builder()
            .model(self.model.as_str())
            .prompt(prompt)
            .size(self.size.clone())
            .build()
            .map_err(|e| {
                ModelsError::new(ModelsErrorKind::Builder(format!(
                    "Failed to build image request: {}",
                    e
                )))
            })?;

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Image request failed");
                ModelsError::new(ModelsErrorKind::Http(format!(
                    "Request failed: {}",
                    e.without_url()
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "Image API error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: ImageGenerationResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(format!(
                "Failed to parse image response: {}",
                e
            )))
        })?;

        let Some(datum) = parsed.data.into_iter().next() else {
            debug!("Provider returned no image data");
            return Ok(None);
        };

        if let Some(encoded) = datum.b64_json.filter(|s| !s.is_empty()) {
            return decode_image(&encoded).map(Some);
        }
        match datum.url {
            Some(url) if !url.is_empty() => self.download(&url).await.map(Some),
            _ => Ok(None),
        }
    }

    async fn download(&self, url: &str) -> ModelsResult<GeneratedImage> {
        let response = self.client.get(url).send().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::Http(format!(
                "Image download failed: {}",
                e.without_url()
            )))
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message: "image download rejected".to_string(),
            }));
        }
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::Http(format!(
                "Image download interrupted: {}",
                e.without_url()
            )))
        })?;
        Ok(GeneratedImage::new(mime, bytes.to_vec()))
    }
}

/// Decode a base64 payload and sniff its MIME type from the magic bytes.
pub(crate) fn decode_image(encoded: &str) -> ModelsResult<GeneratedImage> {
    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ModelsError::new(ModelsErrorKind::Decode(e.to_string())))?;
    if data.is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::Decode(
            "image payload is empty".to_string(),
        )));
    }
    let mime = sniff_mime(&data).map(str::to_string);
    Ok(GeneratedImage::new(mime, data))
}

fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

#[async_trait]
impl ImageGenerator for OpenAIImageClient {
    async fn generate(&self, prompt: &str) -> StoryloomResult<Option<GeneratedImage>> {
        Ok(self.render(prompt).await?)
    }
}
