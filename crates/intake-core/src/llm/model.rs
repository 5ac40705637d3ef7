//! LanguageModel trait definition.
//!
//! This is the single capability the engine consumes from a model backend,
//! whichever vendor serves it.

use intake_types::llm::{ModelError, PromptPayload};

/// Trait for language model backends (OpenAI, Gemini, Mistral, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Backends must
/// be safe to share between independent sessions: one call carries all the
/// context it needs, so no per-session affinity is required.
///
/// Implementations live in intake-infra (e.g., `OpenAiCompatibleClient`).
pub trait LanguageModel: Send + Sync {
    /// Human-readable backend name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send one payload and receive the generated text.
    fn send(
        &self,
        payload: &PromptPayload,
    ) -> impl std::future::Future<Output = Result<String, ModelError>> + Send;
}
