//! ImgBB image hosting.

use crate::images::dto::ImgBbResponse;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use storyloom_core::GeneratedImage;
use storyloom_error::{ModelsError, ModelsErrorKind, ModelsResult, StoryloomResult};
use storyloom_interface::ImageUploader;
use tracing::{debug, error, instrument, warn};

/// ImgBB's upload endpoint.
pub const DEFAULT_IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Uploads images to ImgBB.
///
/// The API key travels as the `key` query parameter; the image and its
/// display name are multipart fields `image` and `name`.
#[derive(Debug, Clone)]
pub struct ImgBbUploader {
    client: Client,
    api_key: String,
    upload_url: String,
}

impl ImgBbUploader {
    /// Uploader posting to `upload_url`.
    pub fn new(api_key: String, upload_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            upload_url,
        }
    }

    /// Uploader for the public ImgBB endpoint.
    pub fn imgbb(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_IMGBB_UPLOAD_URL.to_string())
    }

    /// Uploads `image` and returns its public URL.
    ///
    /// Returns `Ok(None)` when ImgBB accepted the upload but reported no URL.
    #[instrument(skip(self, image), fields(size = image.len()))]
    pub async fn publish(&self, image: &GeneratedImage, name: &str) -> ModelsResult<Option<String>> {
        let mime = image.mime.as_deref().unwrap_or("image/jpeg");
        let part = Part::bytes(image.data.clone())
            .file_name(format!("{}.{}", name, extension_for(mime)))
            .mime_str(mime)
            .map_err(|e| {
                ModelsError::new(ModelsErrorKind::Builder(format!(
                    "Invalid image MIME type '{}': {}",
                    mime, e
                )))
            })?;
        let form = Form::new().part("image", part).text("name", name.to_string());

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Upload request failed");
                ModelsError::new(ModelsErrorKind::Http(format!(
                    "Upload failed: {}",
                    e.without_url()
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "Upload rejected");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: ImgBbResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(format!(
                "Failed to parse upload response: {}",
                e
            )))
        })?;

        let url = parsed
            .data
            .and_then(|data| data.url)
            .filter(|url| !url.is_empty());
        match &url {
            Some(url) => debug!(url = %url, "Uploaded image"),
            None => warn!(success = parsed.success, "Upload response carried no URL"),
        }
        Ok(url)
    }
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

#[async_trait]
impl ImageUploader for ImgBbUploader {
    async fn upload(&self, image: &GeneratedImage, name: &str) -> StoryloomResult<Option<String>> {
        Ok(self.publish(image, name).await?)
    }
}
