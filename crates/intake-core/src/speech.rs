//! Speech-to-text collaborator port.
//!
//! A transcription is treated exactly like typed input at whichever step is
//! active. Failures surface before the interview machine sees anything.

use intake_types::error::TranscriptionError;

/// Trait for speech-to-text backends.
pub trait SpeechToText: Send + Sync {
    /// Turn raw audio bytes into text.
    fn transcribe(
        &self,
        audio: &[u8],
    ) -> impl std::future::Future<Output = Result<String, TranscriptionError>> + Send;
}
