//! Configuration types for Intake.
//!
//! `EngineConfig` represents the top-level `config.toml`: which model backend
//! to call, generation parameters, the scope policy, and the interview script.
//! Every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::policy::PolicyDirective;

/// Top-level configuration for the interview engine and its host.
///
/// Loaded from `~/.intake/config.toml`. All sections are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub model: ModelConfig,
    pub generation: GenerationSettings,
    pub policy: PolicyDirective,
    pub interview: InterviewConfig,
}

/// Which OpenAI-compatible backend serves the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[serde(rename = "openai", alias = "open_ai")]
    OpenAi,
    #[default]
    Gemini,
    Mistral,
    /// Any OpenAI-compatible endpoint; requires `base_url`.
    Custom,
}

impl ProviderKind {
    /// Environment variable conventionally holding this backend's API key.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Mistral => "MISTRAL_API_KEY",
            ProviderKind::Custom => "INTAKE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Mistral => write!(f, "mistral"),
            ProviderKind::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "open_ai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            "mistral" => Ok(ProviderKind::Mistral),
            "custom" => Ok(ProviderKind::Custom),
            other => Err(format!("invalid provider: '{other}'")),
        }
    }
}

/// Model backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Overrides the provider's default base URL.
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Per-call timeout; an elapsed timeout counts as a connection failure.
    pub request_timeout_secs: u64,
}

impl ModelConfig {
    /// The env var to read the API key from, falling back to the provider's convention.
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: "gemini-1.5-flash".to_string(),
            base_url: None,
            api_key_env: None,
            request_timeout_secs: 60,
        }
    }
}

/// Sampling parameters sent with every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: Some(0.7),
        }
    }
}

/// The fixed category set, input limits, and the texts shown at each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    pub categories: Vec<String>,
    pub max_input_chars: usize,
    pub script: InterviewScript,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                "Abdomen".to_string(),
                "Pelvis".to_string(),
                "Lower back".to_string(),
                "Other".to_string(),
            ],
            max_input_chars: 2000,
            script: InterviewScript::default(),
        }
    }
}

/// Host-facing texts for each step, plus the labels used to phrase the
/// first user turn (`"{detail_label}: ... {category_label}: ..."`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewScript {
    pub confirmation_prompt: String,
    pub category_prompt: String,
    pub detail_prompt: String,
    pub dialogue_prompt: String,
    pub declined_message: String,
    pub category_label: String,
    pub detail_label: String,
}

impl Default for InterviewScript {
    fn default() -> Self {
        Self {
            confirmation_prompt: "Have you had surgery recently and want to track possible \
                adhesion symptoms?"
                .to_string(),
            category_prompt: "Select the affected region:".to_string(),
            detail_prompt: "Describe your symptoms (e.g. abdominal pain, bloating, nausea):"
                .to_string(),
            dialogue_prompt: "Ask a follow-up question or add more detail.".to_string(),
            declined_message: "Understood. This tracker only covers post-surgery adhesion \
                symptoms. You can start over at any time."
                .to_string(),
            category_label: "Affected region".to_string(),
            detail_label: "Symptoms".to_string(),
        }
    }
}
