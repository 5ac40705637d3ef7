//! Infrastructure implementations for Intake.
//!
//! Provides the concrete collaborators the engine consumes through traits:
//! OpenAI-compatible model backends, a timeout wrapper, environment-variable
//! secret lookup, and the `config.toml` loader.

pub mod config;
pub mod llm;
pub mod secret;
