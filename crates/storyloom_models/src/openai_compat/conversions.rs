//! Conversions between Storyloom and OpenAI chat formats.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse};
use storyloom_core::{GenerateRequest, GenerateResponse, TokenUsage};
use storyloom_error::{ModelsError, ModelsErrorKind, ModelsResult};

/// Converts a GenerateRequest to the chat request body.
///
/// The request's own model wins over `default_model`.
pub fn to_chat_request(req: &GenerateRequest, default_model: &str) -> ModelsResult<ChatRequest> {
    let messages: Vec<ChatMessage> = req
        .messages
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role.to_string(),
            content: Some(msg.content.clone()),
        })
        .collect();

    let model = req.model.as_deref().unwrap_or(default_model);

    ChatRequest::builder()
        .model(model)
        .messages(messages)
        .max_tokens(req.max_tokens)
        .temperature(req.temperature)
        .build()
        .map_err(|e| {
            ModelsError::new(ModelsErrorKind::Builder(format!(
                "Failed to build chat request: {}",
                e
            )))
        })
}

/// Converts a chat response to a GenerateResponse.
pub fn from_chat_response(response: ChatResponse) -> ModelsResult<GenerateResponse> {
    if let Some(error) = response.error {
        let status = error
            .code
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(200);
        return Err(ModelsError::new(ModelsErrorKind::Api {
            status,
            message: error.message,
        }));
    }

    if response.choices.is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::ResponseParsing(
            "No choices in response".to_string(),
        )));
    }

    let outputs = response
        .choices
        .into_iter()
        .map(|choice| choice.message.content.unwrap_or_default())
        .collect();

    let usage = response.usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens.unwrap_or_default(),
        completion_tokens: u.completion_tokens.unwrap_or_default(),
    });

    Ok(GenerateResponse {
        outputs,
        model: response.model,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_core::{GenerateRequestBuilder, Message};

    #[test]
    fn test_request_uses_default_model_and_lowercase_roles() {
        let req = GenerateRequestBuilder::default()
            .messages(vec![Message::system("sys"), Message::user("hi")])
            .max_tokens(Some(2048))
            .temperature(Some(1.0))
            .build()
            .unwrap();

        let chat = to_chat_request(&req, "deepseek/deepseek-r1-0528:free").unwrap();
        let body = serde_json::to_value(&chat).unwrap();

        assert_eq!(body["model"], "deepseek/deepseek-r1-0528:free");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["max_tokens"], 2048);
        assert_eq!(body["temperature"], 1.0);
    }

    #[test]
    fn test_request_omits_unset_sampling() {
        let req = GenerateRequestBuilder::default()
            .messages(vec![Message::user("hi")])
            .model(Some("other/model".to_string()))
            .build()
            .unwrap();

        let body = serde_json::to_value(to_chat_request(&req, "default").unwrap()).unwrap();
        assert_eq!(body["model"], "other/model");
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_response_keeps_model_and_usage() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "model": "deepseek/deepseek-r1-0528",
            "choices": [{"message": {"role": "assistant", "content": "###STORY:\nhi"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
        }))
        .unwrap();

        let out = from_chat_response(response).unwrap();
        assert_eq!(out.text(), "###STORY:\nhi");
        assert_eq!(out.model_name(), "deepseek/deepseek-r1-0528");
        assert_eq!(out.usage.unwrap().completion_tokens, 20);
    }

    #[test]
    fn test_null_content_becomes_empty_text() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(from_chat_response(response).unwrap().text(), "");
    }

    #[test]
    fn test_embedded_error_is_api_error() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "error": {"code": 429, "message": "Rate limit exceeded: free-models-per-day"}
        }))
        .unwrap();

        let err = from_chat_response(response).unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::Api { status: 429, .. }));
    }

    #[test]
    fn test_no_choices_is_parse_error() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        let err = from_chat_response(response).unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::ResponseParsing(_)));
    }
}
