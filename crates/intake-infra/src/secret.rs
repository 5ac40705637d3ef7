//! Environment variable secret provider.
//!
//! API keys are read from the variable named by `model.api_key_env` and kept
//! wrapped in a `SecretString` from then on.

use secrecy::SecretString;

use intake_types::error::SecretError;

/// Read-only secret lookup backed by process environment variables.
#[derive(Debug, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable name.
    ///
    /// A variable with invalid Unicode is treated as missing.
    pub fn get(&self, key: &str) -> Result<SecretString, SecretError> {
        secret_from_value(key, std::env::var(key).ok())
    }
}

fn secret_from_value(key: &str, value: Option<String>) -> Result<SecretString, SecretError> {
    match value {
        None => Err(SecretError::NotFound(key.to_string())),
        Some(v) if v.trim().is_empty() => Err(SecretError::Empty(key.to_string())),
        Some(v) => Ok(SecretString::from(v.trim().to_string())),
    }
}
