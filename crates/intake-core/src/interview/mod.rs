//! Guided interview flow.
//!
//! `machine` decides what each input does at each step; `prompt` turns the
//! collected state and transcript into the payload for a model call.

pub mod machine;
pub mod prompt;
