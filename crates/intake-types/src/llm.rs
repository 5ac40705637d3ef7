//! Language model request types for Intake.
//!
//! These types model the payload handed to a language model backend and the
//! classified failures a backend may report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::turn::Speaker;

/// Role of a message in a model conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

impl From<Speaker> for MessageRole {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => MessageRole::User,
            Speaker::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single message in a model conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Everything a backend needs for one call.
///
/// `system` carries the scope policy and interview context; `messages`
/// carries the visible conversation ending with the newest user text.
/// The backend chooses the model identifier from its own configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub system: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl PromptPayload {
    /// The newest user message, if any.
    pub fn latest_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
    }
}

/// Classified failures from a language model backend.
///
/// The engine never retries; each variant is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("authentication failed")]
    AuthenticationFailure,

    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    #[error("rate limited{}", retry_hint(.retry_after_ms))]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("model error: {0}")]
    Unclassified(String),
}

fn retry_hint(retry_after_ms: &Option<u64>) -> String {
    match retry_after_ms {
        Some(ms) => format!(", retry after {ms}ms"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_from_speaker() {
        assert_eq!(MessageRole::from(Speaker::User), MessageRole::User);
        assert_eq!(MessageRole::from(Speaker::Assistant), MessageRole::Assistant);
    }

    #[test]
    fn test_latest_user_text() {
        let payload = PromptPayload {
            system: "rules".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "first".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "reply".to_string(),
                },
                Message {
                    role: MessageRole::User,
                    content: "second".to_string(),
                },
            ],
            max_tokens: 300,
            temperature: Some(0.7),
        };
        assert_eq!(payload.latest_user_text(), Some("second"));
    }

    #[test]
    fn test_payload_skips_missing_temperature() {
        let payload = PromptPayload {
            system: String::new(),
            messages: vec![],
            max_tokens: 10,
            temperature: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_model_error_display() {
        let err = ModelError::RateLimited {
            retry_after_ms: Some(1500),
        };
        assert_eq!(err.to_string(), "rate limited, retry after 1500ms");
        assert_eq!(
            ModelError::RateLimited {
                retry_after_ms: None
            }
            .to_string(),
            "rate limited"
        );
        assert_eq!(
            ModelError::AuthenticationFailure.to_string(),
            "authentication failed"
        );
        assert_eq!(
            ModelError::Unclassified("boom".to_string()).to_string(),
            "model error: boom"
        );
    }
}
