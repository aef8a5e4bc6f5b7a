//! Scripted stand-ins for the model and image services.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use storyloom_core::{GenerateRequest, GenerateResponse, GeneratedImage};
use storyloom_error::{ModelsError, ModelsErrorKind, StoryloomResult};
use storyloom_interface::{ImageGenerator, ImageUploader, StoryDriver};

/// Story driver answering every request with a fixed reply.
pub struct MockDriver {
    reply: Result<String, String>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockDriver {
    /// Driver that always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Driver whose every call fails with an API error.
    #[allow(dead_code)]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of generate calls so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> StoryloomResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match &self.reply {
            Ok(text) => Ok(GenerateResponse::new(text.clone(), Some("mock-model".into()))),
            Err(message) => Err(ModelsError::new(ModelsErrorKind::Api {
                status: 500,
                message: message.clone(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[derive(Debug, Clone)]
enum Script {
    Decline,
    Fail,
}

/// Image generator that succeeds unless a prompt is scripted otherwise.
#[derive(Default)]
pub struct ScriptedGenerator {
    scripts: HashMap<String, Script>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    /// Generator that renders every prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return no image for `prompt`.
    pub fn declining(mut self, prompt: impl Into<String>) -> Self {
        self.scripts.insert(prompt.into(), Script::Decline);
        self
    }

    /// Fail outright for `prompt`.
    #[allow(dead_code)]
    pub fn failing(mut self, prompt: impl Into<String>) -> Self {
        self.scripts.insert(prompt.into(), Script::Fail);
        self
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> StoryloomResult<Option<GeneratedImage>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.scripts.get(prompt) {
            Some(Script::Decline) => Ok(None),
            Some(Script::Fail) => Err(ModelsError::new(ModelsErrorKind::Api {
                status: 400,
                message: "content policy".into(),
            })
            .into()),
            None => Ok(Some(GeneratedImage::new(
                Some("image/png".into()),
                prompt.as_bytes().to_vec(),
            ))),
        }
    }
}

/// Uploader that records names and hands back predictable URLs.
#[derive(Default)]
pub struct RecordingUploader {
    names: Arc<Mutex<Vec<String>>>,
}

impl RecordingUploader {
    /// Uploader with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names uploaded, in order.
    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }

    /// URL returned for image `data`.
    pub fn url_for(data: &str) -> String {
        format!("https://i.ibb.co/{}.png", data.replace(' ', "_"))
    }
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    async fn upload(&self, image: &GeneratedImage, name: &str) -> StoryloomResult<Option<String>> {
        self.names.lock().unwrap().push(name.to_string());
        Ok(Some(Self::url_for(&String::from_utf8_lossy(&image.data))))
    }
}
