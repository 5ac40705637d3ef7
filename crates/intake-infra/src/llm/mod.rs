//! Language model backend implementations.
//!
//! Vendor selection happens here, from `[model]` in `config.toml`; the engine
//! only ever sees a `BoxLanguageModel`.

pub mod openai_compat;
pub mod timeout;

use std::time::Duration;

use secrecy::SecretString;

use intake_core::llm::box_model::BoxLanguageModel;
use intake_types::config::{ModelConfig, ProviderKind};

use self::openai_compat::config::{
    custom_defaults, gemini_defaults, mistral_defaults, openai_defaults,
};
use self::openai_compat::OpenAiCompatibleClient;
use self::timeout::TimeoutModel;

/// Errors while wiring a backend from configuration.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("provider '{0}' requires model.base_url to be set")]
    MissingBaseUrl(ProviderKind),
}

/// Build the configured backend, wrapped in a per-call timeout.
pub fn build_model(
    config: &ModelConfig,
    api_key: SecretString,
) -> Result<BoxLanguageModel, BackendError> {
    let mut compat = match config.provider {
        ProviderKind::OpenAi => openai_defaults(api_key, &config.model),
        ProviderKind::Gemini => gemini_defaults(api_key, &config.model),
        ProviderKind::Mistral => mistral_defaults(api_key, &config.model),
        ProviderKind::Custom => {
            let base_url = config
                .base_url
                .as_deref()
                .ok_or(BackendError::MissingBaseUrl(ProviderKind::Custom))?;
            custom_defaults(base_url, api_key, &config.model)
        }
    };

    if let Some(base_url) = &config.base_url {
        compat.base_url = base_url.clone();
    }

    tracing::debug!(
        provider = %config.provider,
        model = %config.model,
        base_url = %compat.base_url,
        timeout_secs = config.request_timeout_secs,
        "Building language model backend"
    );

    let client = OpenAiCompatibleClient::new(compat);
    Ok(BoxLanguageModel::new(TimeoutModel::new(
        client,
        Duration::from_secs(config.request_timeout_secs),
    )))
}
