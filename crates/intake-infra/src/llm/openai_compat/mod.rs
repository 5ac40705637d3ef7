//! OpenAI-compatible language model backend.
//!
//! A single [`OpenAiCompatibleClient`] serves OpenAI, Google Gemini, Mistral
//! and any self-hosted endpoint that speaks the chat completions protocol,
//! selected by base URL.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::ExposeSecret;

use intake_core::llm::model::LanguageModel;
use intake_types::llm::{MessageRole, ModelError, PromptPayload};

use self::config::OpenAiCompatConfig;

/// Backend for any OpenAI-compatible API.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleClient {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleClient {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a [`PromptPayload`].
    ///
    /// The system prompt always goes first, followed by the conversation.
    fn build_request(&self, payload: &PromptPayload) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(payload.messages.len() + 1);

        messages.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(payload.system.clone()),
                name: None,
            },
        ));

        for msg in &payload.messages {
            let oai_msg = match msg.role {
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            };
            messages.push(oai_msg);
        }

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: Some(payload.max_tokens),
            temperature: payload.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LanguageModel for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn send(&self, payload: &PromptPayload) -> Result<String, ModelError> {
        let request = self.build_request(payload);

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::Unclassified("response contained no content".to_string()))
    }
}

/// Map an `async_openai::error::OpenAIError` to a [`ModelError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> ModelError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || code == "invalid_api_key"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("API key not valid")
            {
                ModelError::AuthenticationFailure
            } else if code == "rate_limit_exceeded"
                || error_type == "rate_limit_error"
                || api_err.message.contains("RESOURCE_EXHAUSTED")
            {
                ModelError::RateLimited {
                    retry_after_ms: None,
                }
            } else {
                ModelError::Unclassified(err.to_string())
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status() {
            Some(status) => match status.as_u16() {
                401 | 403 => ModelError::AuthenticationFailure,
                429 => ModelError::RateLimited {
                    retry_after_ms: None,
                },
                _ => ModelError::Unclassified(err.to_string()),
            },
            // No HTTP status means the request never completed.
            None => ModelError::ConnectionFailure(err.to_string()),
        },
        OpenAIError::JSONDeserialize(_, content) => {
            ModelError::Unclassified(format!("failed to parse response: {content}"))
        }
        _ => ModelError::Unclassified(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_types::llm::Message;
    use secrecy::SecretString;

    fn client() -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(config::openai_defaults(
            SecretString::from("sk-test".to_string()),
            "gpt-4o-mini",
        ))
    }

    fn payload() -> PromptPayload {
        PromptPayload {
            system: "<assistant_role>\nYou are helpful.\n</assistant_role>".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "Symptoms: bloating. Affected region: Abdomen.".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "How long has it lasted?".to_string(),
                },
                Message {
                    role: MessageRole::User,
                    content: "Two days.".to_string(),
                },
            ],
            max_tokens: 300,
            temperature: Some(0.7),
        }
    }

    #[test]
    fn test_name_is_provider() {
        assert_eq!(client().name(), "openai");
    }

    #[test]
    fn test_build_request_puts_system_first() {
        let req = client().build_request(&payload());
        assert_eq!(req.model, "gpt-4o-mini");
        // 1 system + 3 conversation
        assert_eq!(req.messages.len(), 4);
        assert!(matches!(
            req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            req.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert_eq!(req.max_completion_tokens, Some(300));
        assert_eq!(req.temperature, Some(0.7));
        assert!(req.stream.is_none());
    }

    #[test]
    fn test_build_request_without_temperature() {
        let mut p = payload();
        p.temperature = None;
        let req = client().build_request(&p);
        assert!(req.temperature.is_none());
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert_eq!(err, ModelError::AuthenticationFailure);
    }

    #[test]
    fn test_map_openai_error_rate_limit() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Rate limit exceeded".to_string(),
            r#type: Some("rate_limit_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, ModelError::RateLimited { .. }));
    }

    #[test]
    fn test_map_openai_error_other_api_error() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "model not found".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: Some("model_not_found".to_string()),
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, ModelError::Unclassified(ref m) if m.contains("model not found")));
    }

    #[test]
    fn test_map_openai_error_invalid_argument() {
        use async_openai::error::OpenAIError;
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, ModelError::Unclassified(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_failure() {
        // Port 9 (discard) on localhost is closed on test machines.
        let client = OpenAiCompatibleClient::new(config::custom_defaults(
            "http://127.0.0.1:9/v1",
            SecretString::from("sk-test".to_string()),
            "local",
        ));
        let err = client.send(&payload()).await.unwrap_err();
        assert!(matches!(err, ModelError::ConnectionFailure(_)));
    }
}
