//! Language model abstractions for Intake.
//!
//! - `LanguageModel`: RPITIT trait for concrete backends
//! - `BoxLanguageModel`: object-safe wrapper for dynamic dispatch

pub mod box_model;
pub mod model;
