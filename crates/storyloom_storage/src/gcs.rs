//! Google Cloud Storage blob store.
//!
//! Talks to the JSON API of a Cloud Storage bucket (the bucket behind a
//! Firebase project) with a bearer token:
//!
//! - read: `GET {base}/storage/v1/b/{bucket}/o/{object}?alt=media`
//! - exists: `GET {base}/storage/v1/b/{bucket}/o/{object}`
//! - write: `POST {base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}`
//!
//! 404 maps to `NotFound`; transport failures, 5xx and authorization
//! failures map to `Unavailable`.

use crate::validate_key;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_interface::BlobStore;
use tracing::{debug, error, instrument};

/// Public Cloud Storage endpoint.
pub const DEFAULT_GCS_BASE_URL: &str = "https://storage.googleapis.com";

/// Connection settings for [`GcsBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsConfig {
    /// Bucket name, e.g. `my-project.appspot.com`
    pub bucket: String,
    /// OAuth2 access token; `None` for public or emulated buckets
    pub access_token: Option<String>,
    /// API root, overridable for emulators
    pub base_url: String,
}

impl GcsConfig {
    /// Settings for `bucket` on the public endpoint.
    pub fn new(bucket: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            bucket: bucket.into(),
            access_token,
            base_url: DEFAULT_GCS_BASE_URL.to_string(),
        }
    }
}

/// Blob store backed by a Cloud Storage bucket.
#[derive(Debug, Clone)]
pub struct GcsBlobStore {
    client: Client,
    config: GcsConfig,
    base: Url,
}

impl GcsBlobStore {
    /// Create a client for the configured bucket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the bucket is empty or the base URL does
    /// not parse.
    #[instrument(skip(config), fields(bucket = %config.bucket))]
    pub fn new(config: GcsConfig) -> StoryloomResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidConfig(
                "bucket name is empty".to_string(),
            ))
            .into());
        }
        let base = Url::parse(&config.base_url).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidConfig(format!(
                "base url '{}': {}",
                config.base_url, e
            )))
        })?;
        debug!(bucket = %config.bucket, url = %base, "Created Cloud Storage blob store");
        Ok(Self {
            client: Client::new(),
            config,
            base,
        })
    }

    /// Bucket this store reads and writes.
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    fn url_with_segments(&self, segments: &[&str]) -> StoryloomResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StorageError::new(StorageErrorKind::InvalidConfig(format!(
                    "base url '{}' cannot carry a path",
                    self.base
                )))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn object_url(&self, path: &str) -> StoryloomResult<Url> {
        self.url_with_segments(&["storage", "v1", "b", &self.config.bucket, "o", path])
    }

    fn upload_url(&self, path: &str) -> StoryloomResult<Url> {
        let mut url =
            self.url_with_segments(&["upload", "storage", "v1", "b", &self.config.bucket, "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", path);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> StoryloomResult<reqwest::Response> {
        self.authorize(request).send().await.map_err(|e| {
            error!(error = ?e, "Cloud Storage request failed");
            StorageError::new(StorageErrorKind::Unavailable(e.without_url().to_string())).into()
        })
    }
}

/// Map an unsuccessful response status onto a storage error kind.
fn status_error(status: StatusCode, path: &str, body: &str, writing: bool) -> StorageError {
    let detail = format!("{} ({}): {}", path, status, body.trim());
    let kind = if status == StatusCode::NOT_FOUND {
        StorageErrorKind::NotFound(path.to_string())
    } else if status.is_server_error()
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        StorageErrorKind::Unavailable(detail)
    } else if writing {
        StorageErrorKind::FileWrite(detail)
    } else {
        StorageErrorKind::FileRead(detail)
    };
    StorageError::new(kind)
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    fn backend_name(&self) -> &'static str {
        "gcs"
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn exists(&self, path: &str) -> StoryloomResult<bool> {
        validate_key(path)?;
        let url = self.object_url(path)?;
        let response = self.send(self.client.get(url)).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, path, &body, false).into())
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn read_text(&self, path: &str) -> StoryloomResult<String> {
        validate_key(path)?;
        let mut url = self.object_url(path)?;
        url.query_pairs_mut().append_pair("alt", "media");

        let response = self.send(self.client.get(url)).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, path, &body, false).into());
        }

        let text = response.text().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "{}: {}",
                path,
                e.without_url()
            )))
        })?;
        debug!(path, size = text.len(), "Downloaded object");
        Ok(text)
    }

    #[instrument(skip(self, content), fields(bucket = %self.config.bucket, size = content.len()))]
    async fn write_content(
        &self,
        path: &str,
        content: &str,
        content_type: &str,
    ) -> StoryloomResult<()> {
        validate_key(path)?;
        let url = self.upload_url(path)?;
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(content.to_string());

        let response = self.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, path, &body, true).into());
        }

        debug!(path, size = content.len(), "Uploaded object");
        Ok(())
    }
}
