use thiserror::Error;

pub use crate::llm::ModelError;

/// Input rejected at the current interview step.
///
/// The session is left untouched; the caller re-prompts for the same step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input cannot be empty")]
    EmptyInput,

    #[error("expected yes or no, got '{0}'")]
    UnrecognizedConfirmation(String),

    #[error("unknown category '{given}' (expected one of: {})", allowed.join(", "))]
    UnknownCategory { given: String, allowed: Vec<String> },

    #[error("input exceeds maximum length of {0} characters")]
    InputTooLong(usize),

    #[error("session was declined; start over to continue")]
    SessionDeclined,
}

/// Errors from the optional speech-to-text collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptionError {
    #[error("speech-to-text unavailable: {0}")]
    Unavailable(String),

    #[error("audio input is empty")]
    EmptyAudio,

    #[error("transcription failed: {0}")]
    Failed(String),
}

/// Everything `SessionController::handle` can report.
///
/// None of these is fatal: the session stays at the same step and the
/// transcript is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}

/// Errors related to secret lookup.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret '{0}' not found")]
    NotFound(String),

    #[error("secret '{0}' is empty")]
    Empty(String),
}
