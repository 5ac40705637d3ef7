//! Session controller: the façade a host drives.
//!
//! `handle` feeds one raw input through the interview machine and, when the
//! machine asks for it, through the prompt builder and the language model.
//! State and transcript change together only after everything succeeded;
//! any error leaves the session exactly as it was.

use tracing::{Instrument, debug, info, info_span, warn};

use intake_types::config::EngineConfig;
use intake_types::error::{SessionError, TranscriptionError};
use intake_types::interview::InterviewStep;
use intake_types::llm::ModelError;
use intake_types::turn::{Speaker, Turn};

use crate::interview::machine::{InterviewMachine, Transition};
use crate::interview::prompt::PromptBuilder;
use crate::speech::SpeechToText;

use super::session::Session;

/// Result of one successfully handled input.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleOutcome {
    /// Turns appended by this input (empty for confirmation/category steps).
    pub delta: Vec<Turn>,
    /// The step the session is in afterwards.
    pub step: InterviewStep,
    /// What to show the user: the assistant reply when the model was called,
    /// otherwise the prompt for the new step.
    pub display: String,
}

/// Drives sessions through the interview.
///
/// Holds no per-session data, so one controller can be shared by every
/// session in a process.
#[derive(Debug, Clone)]
pub struct SessionController {
    machine: InterviewMachine,
    prompts: PromptBuilder,
}

impl SessionController {
    pub fn new(machine: InterviewMachine, prompts: PromptBuilder) -> Self {
        Self { machine, prompts }
    }

    /// Build the machine and prompt builder from a loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            InterviewMachine::new(config.interview.clone()),
            PromptBuilder::new(config.policy.clone(), config.generation.clone()),
        )
    }

    pub fn machine(&self) -> &InterviewMachine {
        &self.machine
    }

    /// Text to show before the first input of a fresh session.
    pub fn opening_prompt(&self) -> &str {
        self.machine.prompt_for(InterviewStep::AwaitingConfirmation)
    }

    /// Text to show while a session sits at `step` (e.g. to re-prompt after an error).
    pub fn prompt_for(&self, step: InterviewStep) -> &str {
        self.machine.prompt_for(step)
    }

    /// Feed one raw input to the session.
    pub async fn handle(
        &self,
        session: &mut Session,
        raw: &str,
    ) -> Result<HandleOutcome, SessionError> {
        let from = session.step();
        let transition = self.machine.plan(&session.state, raw).map_err(|err| {
            debug!(session_id = %session.id(), step = %from, error = %err, "Input rejected");
            err
        })?;

        match transition {
            Transition::Advance { next, display } => {
                info!(session_id = %session.id(), from = %from, to = %next.step(), "Interview step advanced");
                session.state = next;
                Ok(HandleOutcome {
                    delta: Vec::new(),
                    step: session.step(),
                    display,
                })
            }

            Transition::Consult { next, user_text } => {
                let payload = self.prompts.build(&next, &session.transcript, &user_text);

                let span = info_span!(
                    "gen_ai.send",
                    gen_ai.provider.name = session.model().name(),
                    gen_ai.request.max_tokens = payload.max_tokens,
                    gen_ai.request.temperature = ?payload.temperature,
                    session_id = %session.id(),
                    messages = payload.messages.len(),
                );

                let reply = match session.model().send(&payload).instrument(span).await {
                    Ok(reply) => reply,
                    Err(err) => {
                        warn!(session_id = %session.id(), step = %from, error = %err, "Model call failed; session unchanged");
                        return Err(err.into());
                    }
                };

                let reply = reply.trim();
                if reply.is_empty() {
                    warn!(session_id = %session.id(), "Model returned an empty reply; session unchanged");
                    return Err(ModelError::Unclassified("empty response".to_string()).into());
                }

                let mark = session.transcript.last_id();
                session.transcript.append(Speaker::User, user_text);
                session.transcript.append(Speaker::Assistant, reply);
                session.state = next;

                info!(
                    session_id = %session.id(),
                    from = %from,
                    to = %session.step(),
                    turns = session.transcript.len(),
                    "Exchange recorded"
                );

                Ok(HandleOutcome {
                    delta: session.transcript.since(mark).to_vec(),
                    step: session.step(),
                    display: reply.to_string(),
                })
            }
        }
    }

    /// Transcribe audio and handle the text as if it had been typed.
    ///
    /// A transcription failure is returned before the interview machine is
    /// consulted, so it never produces a turn.
    pub async fn handle_audio<S: SpeechToText>(
        &self,
        session: &mut Session,
        speech: &S,
        audio: &[u8],
    ) -> Result<HandleOutcome, SessionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio.into());
        }

        let text = speech.transcribe(audio).await.map_err(|err| {
            warn!(session_id = %session.id(), error = %err, "Transcription failed");
            err
        })?;

        debug!(session_id = %session.id(), chars = text.len(), "Audio transcribed");
        self.handle(session, &text).await
    }

    /// Return the session to its initial configuration. Idempotent.
    pub fn reset(&self, session: &mut Session) {
        info!(session_id = %session.id(), from = %session.step(), "Session reset");
        session.reset();
    }
}
