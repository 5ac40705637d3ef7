//! BoxLanguageModel -- object-safe dynamic dispatch wrapper for LanguageModel.
//!
//! 1. Define an object-safe `LanguageModelDyn` trait with boxed futures
//! 2. Blanket-impl `LanguageModelDyn` for all `T: LanguageModel`
//! 3. `BoxLanguageModel` wraps `Box<dyn LanguageModelDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use intake_types::llm::{ModelError, PromptPayload};

use super::model::LanguageModel;

/// Object-safe version of [`LanguageModel`] with boxed futures.
pub trait LanguageModelDyn: Send + Sync {
    fn name(&self) -> &str;

    fn send_boxed<'a>(
        &'a self,
        payload: &'a PromptPayload,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>>;
}

impl<T: LanguageModel> LanguageModelDyn for T {
    fn name(&self) -> &str {
        LanguageModel::name(self)
    }

    fn send_boxed<'a>(
        &'a self,
        payload: &'a PromptPayload,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>> {
        Box::pin(self.send(payload))
    }
}

/// Type-erased language model for runtime backend selection.
///
/// Since `LanguageModel` uses RPITIT, it cannot be used as a trait object
/// directly. Sessions hold an `Arc<BoxLanguageModel>` so one backend can
/// serve many sessions.
pub struct BoxLanguageModel {
    inner: Box<dyn LanguageModelDyn + Send + Sync>,
}

impl BoxLanguageModel {
    /// Wrap a concrete `LanguageModel` in a type-erased box.
    pub fn new<T: LanguageModel + 'static>(model: T) -> Self {
        Self {
            inner: Box::new(model),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn send(&self, payload: &PromptPayload) -> Result<String, ModelError> {
        self.inner.send_boxed(payload).await
    }
}

impl std::fmt::Debug for BoxLanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxLanguageModel")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoModel;

    impl LanguageModel for EchoModel {
        fn name(&self) -> &str {
            "echo"
        }

        async fn send(&self, payload: &PromptPayload) -> Result<String, ModelError> {
            payload
                .latest_user_text()
                .map(|t| format!("echo: {t}"))
                .ok_or_else(|| ModelError::Unclassified("no user message".to_string()))
        }
    }

    fn payload(messages: Vec<intake_types::llm::Message>) -> PromptPayload {
        PromptPayload {
            system: "rules".to_string(),
            messages,
            max_tokens: 64,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_box_delegates_send() {
        let model = BoxLanguageModel::new(EchoModel);
        assert_eq!(model.name(), "echo");

        let reply = model
            .send(&payload(vec![intake_types::llm::Message {
                role: intake_types::llm::MessageRole::User,
                content: "hello".to_string(),
            }]))
            .await
            .unwrap();
        assert_eq!(reply, "echo: hello");
    }

    #[tokio::test]
    async fn test_box_propagates_errors() {
        let model = BoxLanguageModel::new(EchoModel);
        let err = model.send(&payload(vec![])).await.unwrap_err();
        assert!(matches!(err, ModelError::Unclassified(_)));
    }

    #[test]
    fn test_debug_shows_name_only() {
        let model = BoxLanguageModel::new(EchoModel);
        assert_eq!(format!("{model:?}"), "BoxLanguageModel { name: \"echo\" }");
    }
}
