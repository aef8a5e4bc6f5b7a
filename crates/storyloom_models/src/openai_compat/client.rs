//! HTTP client for OpenAI-compatible chat completions.

use crate::openai_compat::{ChatResponse, conversions};
use async_trait::async_trait;
use reqwest::Client;
use storyloom_core::{GenerateRequest, GenerateResponse};
use storyloom_error::{ModelsError, ModelsErrorKind, ModelsResult, StoryloomResult};
use storyloom_interface::StoryDriver;
use tracing::{debug, error, instrument};

/// OpenRouter's chat completions endpoint.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Client for any API that follows the OpenAI chat completions format.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider_name: &'static str,
    app_title: Option<String>,
}

impl OpenAICompatibleClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token
    /// * `model` - Model used when a request does not name one
    /// * `base_url` - Full URL of the chat completions endpoint
    /// * `provider_name` - Name used in logs
    #[instrument(skip(api_key), fields(provider = provider_name, model = %model))]
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        provider_name: &'static str,
    ) -> Self {
        debug!(
            provider = provider_name,
            model = %model,
            url = %base_url,
            "Created OpenAI-compatible client"
        );

        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            provider_name,
            app_title: None,
        }
    }

    /// Client for OpenRouter.
    pub fn openrouter(api_key: String, model: String) -> Self {
        Self::new(api_key, model, DEFAULT_OPENROUTER_URL.to_string(), "openrouter")
    }

    /// Sends `title` as the `X-Title` header, which OpenRouter uses to
    /// attribute traffic to an application.
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    /// Endpoint this client posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs one chat completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the provider answers
    /// with a non-success status, or the body cannot be parsed.
    #[instrument(skip(self, req), fields(provider = self.provider_name, model = %self.model))]
    pub async fn complete(&self, req: &GenerateRequest) -> ModelsResult<GenerateResponse> {
        let chat_request = conversions::to_chat_request(req, &self.model)?;

        debug!(
            provider = self.provider_name,
            model = %chat_request.model(),
            message_count = chat_request.messages().len(),
            "Sending request"
        );

        let mut request = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request);
        if let Some(title) = &self.app_title {
            request = request.header("X-Title", title);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "HTTP request failed");
            ModelsError::new(ModelsErrorKind::Http(format!(
                "Request failed: {}",
                e.without_url()
            )))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider_name,
                status = %status,
                error = %error_text,
                "API error"
            );
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message: error_text,
            }));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to parse response");
            ModelsError::new(ModelsErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            served_by = chat_response.model.as_deref().unwrap_or(""),
            "Received response"
        );

        conversions::from_chat_response(chat_response)
    }
}

#[async_trait]
impl StoryDriver for OpenAICompatibleClient {
    async fn generate(&self, req: &GenerateRequest) -> StoryloomResult<GenerateResponse> {
        Ok(self.complete(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
