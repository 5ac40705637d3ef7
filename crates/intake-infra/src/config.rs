//! Configuration loader for Intake.
//!
//! Reads `config.toml` from the data directory (`~/.intake/` in production)
//! and deserializes it into [`EngineConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use intake_types::config::{EngineConfig, InterviewConfig, ModelConfig};

/// File name looked up inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory.
///
/// Priority: `INTAKE_DATA_DIR`, then `~/.intake`, then `./.intake`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("INTAKE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".intake");
    }

    PathBuf::from(".intake")
}

/// Load configuration from `{data_dir}/config.toml`.
pub async fn load_engine_config(data_dir: &Path) -> EngineConfig {
    load_engine_config_from(&data_dir.join(CONFIG_FILE)).await
}

/// Load configuration from an explicit file path.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: a warning, then defaults.
/// - Otherwise the parsed config, normalized by [`normalize`].
pub async fn load_engine_config_from(config_path: &Path) -> EngineConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return EngineConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return EngineConfig::default();
        }
    };

    match toml::from_str::<EngineConfig>(&content) {
        Ok(config) => normalize(config),
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            EngineConfig::default()
        }
    }
}

/// Replace values the engine cannot run with by their defaults.
pub fn normalize(mut config: EngineConfig) -> EngineConfig {
    if config.interview.categories.iter().all(|c| c.trim().is_empty()) {
        tracing::warn!("interview.categories is empty, using the default category set");
        config.interview.categories = InterviewConfig::default().categories;
    } else {
        config.interview.categories = config
            .interview
            .categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }

    if config.interview.max_input_chars == 0 {
        tracing::warn!("interview.max_input_chars must be positive, using the default");
        config.interview.max_input_chars = InterviewConfig::default().max_input_chars;
    }

    if config.model.request_timeout_secs == 0 {
        tracing::warn!("model.request_timeout_secs must be positive, using the default");
        config.model.request_timeout_secs = ModelConfig::default().request_timeout_secs;
    }

    config
}
