//! Model and image service traits.

use async_trait::async_trait;
use storyloom_core::{GenerateRequest, GenerateResponse, GeneratedImage};
use storyloom_error::StoryloomResult;

/// A chat-completion backend that writes stories.
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Run one completion.
    async fn generate(&self, req: &GenerateRequest) -> StoryloomResult<GenerateResponse>;

    /// Provider name, e.g. `openrouter`.
    fn provider_name(&self) -> &'static str;

    /// Model requested when the request does not name one.
    fn model_name(&self) -> &str;
}

/// Turns a visual prompt into image bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image. `Ok(None)` means the service declined to
    /// produce anything for this prompt.
    async fn generate(&self, prompt: &str) -> StoryloomResult<Option<GeneratedImage>>;
}

/// Publishes image bytes and returns a public URL.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload `image` under `name`. `Ok(None)` means the host accepted the
    /// request but returned no URL.
    async fn upload(&self, image: &GeneratedImage, name: &str) -> StoryloomResult<Option<String>>;
}
