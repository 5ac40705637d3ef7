//! A single interview session.
//!
//! Owns one interview state and one transcript, plus a shared handle to the
//! language model. Hosts create one session per user and keep it for as long
//! as that user is connected; nothing in the engine stores sessions globally.

use std::sync::Arc;

use uuid::Uuid;

use intake_types::interview::{InterviewState, InterviewStep};

use crate::llm::box_model::BoxLanguageModel;

use super::transcript::Transcript;

/// One user's interview.
///
/// All mutation goes through `SessionController`, which takes `&mut Session`,
/// so at most one input can be in flight per session.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    pub(crate) state: InterviewState,
    pub(crate) transcript: Transcript,
    model: Arc<BoxLanguageModel>,
}

impl Session {
    /// Start a session at `AwaitingConfirmation` with an empty transcript.
    pub fn new(model: Arc<BoxLanguageModel>) -> Self {
        Self {
            id: Uuid::now_v7(),
            state: InterviewState::default(),
            transcript: Transcript::new(),
            model,
        }
    }

    /// Log-correlation id; survives reset.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn step(&self) -> InterviewStep {
        self.state.step()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn model(&self) -> &Arc<BoxLanguageModel> {
        &self.model
    }

    /// Back to the initial state with a fresh transcript. Keeps id and model.
    pub(crate) fn reset(&mut self) {
        self.state = InterviewState::default();
        self.transcript = Transcript::new();
    }
}
