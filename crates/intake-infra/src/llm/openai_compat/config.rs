//! Configuration and per-provider defaults for OpenAI-compatible backends.
//!
//! Each vendor that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with the correct
//! base URL.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible backend.
///
/// Used to construct an [`super::OpenAiCompatibleClient`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini", "gemini-1.5-flash").
    pub model: String,
}

/// OpenAI. Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// Google Gemini (OpenAI-compatible beta endpoint).
///
/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        api_key,
        model: model.into(),
    }
}

/// Mistral AI. Base URL: `https://api.mistral.ai/v1`
pub fn mistral_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "mistral".into(),
        base_url: "https://api.mistral.ai/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// Any other OpenAI-compatible endpoint (local proxies, self-hosted servers).
pub fn custom_defaults(base_url: &str, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "custom".into(),
        base_url: base_url.trim_end_matches('/').into(),
        api_key,
        model: model.into(),
    }
}
