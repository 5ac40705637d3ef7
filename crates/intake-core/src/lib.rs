//! Interview session engine for Intake.
//!
//! This crate holds the engine and the "ports" (capability traits) that the
//! infrastructure layer implements. It depends only on `intake-types` --
//! never on `intake-infra` or any network/IO crate.
//!
//! Hosts own [`chat::session::Session`] values and drive them through
//! [`chat::controller::SessionController`].

pub mod chat;
pub mod interview;
pub mod llm;
pub mod speech;
