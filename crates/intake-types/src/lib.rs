//! Shared domain types for the Intake interview engine.
//!
//! Transcript turns, interview state, scope policy, model payloads,
//! configuration, and the error taxonomy shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod interview;
pub mod llm;
pub mod policy;
pub mod turn;
