//! Per-call timeout around any language model backend.
//!
//! An elapsed timeout is reported as `ModelError::ConnectionFailure`, so the
//! session controller treats it like any other failed call: no turn is
//! appended and the interview step does not advance.

use std::time::Duration;

use intake_core::llm::model::LanguageModel;
use intake_types::llm::{ModelError, PromptPayload};

pub struct TimeoutModel<M> {
    inner: M,
    timeout: Duration,
}

impl<M: LanguageModel> TimeoutModel<M> {
    pub fn new(inner: M, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl<M: LanguageModel> LanguageModel for TimeoutModel<M> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn send(&self, payload: &PromptPayload) -> Result<String, ModelError> {
        match tokio::time::timeout(self.timeout, self.inner.send(payload)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    provider = self.inner.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Model call timed out"
                );
                Err(ModelError::ConnectionFailure(format!(
                    "no response within {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
