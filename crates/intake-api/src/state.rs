//! Application state wiring configuration and the model backend together.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use intake_core::chat::controller::SessionController;
use intake_core::llm::box_model::BoxLanguageModel;
use intake_infra::config::{load_engine_config, load_engine_config_from, resolve_data_dir};
use intake_infra::llm::build_model;
use intake_infra::secret::EnvSecretProvider;
use intake_types::config::{EngineConfig, ProviderKind};

/// Resolved configuration plus where it came from.
pub struct AppState {
    pub config: EngineConfig,
    pub data_dir: PathBuf,
    /// The file the configuration was read from (it may not exist).
    pub config_path: PathBuf,
}

impl AppState {
    /// Load configuration and apply command-line overrides.
    pub async fn init(
        config_override: Option<&Path>,
        provider: Option<ProviderKind>,
        model: Option<String>,
    ) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let (config, config_path) = match config_override {
            Some(path) => (load_engine_config_from(path).await, path.to_path_buf()),
            None => (
                load_engine_config(&data_dir).await,
                data_dir.join(intake_infra::config::CONFIG_FILE),
            ),
        };

        Ok(Self {
            config: apply_overrides(config, provider, model),
            data_dir,
            config_path,
        })
    }

    /// Read the API key and build the configured backend.
    pub fn model(&self) -> anyhow::Result<Arc<BoxLanguageModel>> {
        let key_env = self.config.model.api_key_env();
        let api_key = EnvSecretProvider::new().get(key_env).with_context(|| {
            format!("set {key_env} to the API key for the {} backend", self.config.model.provider)
        })?;

        let model = build_model(&self.config.model, api_key)
            .context("failed to configure the model backend")?;
        Ok(Arc::new(model))
    }

    pub fn controller(&self) -> SessionController {
        SessionController::from_config(&self.config)
    }
}

fn apply_overrides(
    mut config: EngineConfig,
    provider: Option<ProviderKind>,
    model: Option<String>,
) -> EngineConfig {
    if let Some(provider) = provider {
        config.model.provider = provider;
    }
    if let Some(model) = model {
        config.model.model = model;
    }
    config
}
