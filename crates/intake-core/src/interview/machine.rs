//! Interview state machine.
//!
//! The machine is a pure planner: given the current state and one raw input
//! it either rejects the input or returns a [`Transition`] describing what
//! should happen. It never mutates anything itself; the session controller
//! commits a transition only once any required model call has succeeded.

use intake_types::config::InterviewConfig;
use intake_types::error::ValidationError;
use intake_types::interview::{Category, InterviewState, InterviewStep};

/// The outcome of planning one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Commit `next` immediately and show `display`. No model call.
    Advance { next: InterviewState, display: String },
    /// Append `user_text`, call the model, append its reply, then commit `next`.
    Consult {
        next: InterviewState,
        user_text: String,
    },
}

impl Transition {
    pub fn next(&self) -> &InterviewState {
        match self {
            Transition::Advance { next, .. } | Transition::Consult { next, .. } => next,
        }
    }
}

const YES: &[&str] = &["yes", "y", "true", "1"];
const NO: &[&str] = &["no", "n", "false", "0"];

/// Validates inputs and plans transitions for the fixed interview flow:
/// confirmation, category, initial detail, then open dialogue.
#[derive(Debug, Clone)]
pub struct InterviewMachine {
    config: InterviewConfig,
}

impl InterviewMachine {
    pub fn new(config: InterviewConfig) -> Self {
        Self { config }
    }

    /// The fixed set a category must be chosen from.
    pub fn categories(&self) -> &[String] {
        &self.config.categories
    }

    /// Text the host shows while a session sits at `step`.
    pub fn prompt_for(&self, step: InterviewStep) -> &str {
        let script = &self.config.script;
        match step {
            InterviewStep::AwaitingConfirmation => &script.confirmation_prompt,
            InterviewStep::CategorySelection => &script.category_prompt,
            InterviewStep::DetailEntry => &script.detail_prompt,
            InterviewStep::OpenDialogue => &script.dialogue_prompt,
            InterviewStep::Declined => &script.declined_message,
        }
    }

    /// Decide what `raw` does at `state`.
    pub fn plan(&self, state: &InterviewState, raw: &str) -> Result<Transition, ValidationError> {
        match state {
            InterviewState::Declined => Err(ValidationError::SessionDeclined),

            InterviewState::AwaitingConfirmation => {
                let next = if parse_confirmation(raw)? {
                    InterviewState::CategorySelection
                } else {
                    InterviewState::Declined
                };
                let display = self.prompt_for(next.step()).to_string();
                Ok(Transition::Advance { next, display })
            }

            InterviewState::CategorySelection => {
                let category = self.match_category(raw)?;
                Ok(Transition::Advance {
                    next: InterviewState::DetailEntry { category },
                    display: self.prompt_for(InterviewStep::DetailEntry).to_string(),
                })
            }

            InterviewState::DetailEntry { category } => {
                let detail = self.free_text(raw)?;
                Ok(Transition::Consult {
                    user_text: self.initial_user_text(category, detail),
                    next: InterviewState::OpenDialogue {
                        category: category.clone(),
                        initial_detail: detail.to_string(),
                    },
                })
            }

            InterviewState::OpenDialogue { .. } => {
                let text = self.free_text(raw)?;
                Ok(Transition::Consult {
                    next: state.clone(),
                    user_text: text.to_string(),
                })
            }
        }
    }

    /// The first user turn, combining the detail with the chosen category.
    pub fn initial_user_text(&self, category: &Category, detail: &str) -> String {
        let script = &self.config.script;
        let detail = match detail.strip_suffix('.') {
            Some(stripped) if !stripped.trim().is_empty() => stripped,
            _ => detail,
        };
        format!(
            "{}: {}. {}: {}.",
            script.detail_label,
            detail,
            script.category_label,
            category
        )
    }

    fn match_category(&self, raw: &str) -> Result<Category, ValidationError> {
        let given = raw.trim();
        if given.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        self.config
            .categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(given))
            .map(|c| Category::new(c.clone()))
            .ok_or_else(|| ValidationError::UnknownCategory {
                given: given.to_string(),
                allowed: self.config.categories.clone(),
            })
    }

    fn free_text<'a>(&self, raw: &'a str) -> Result<&'a str, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        if text.chars().count() > self.config.max_input_chars {
            return Err(ValidationError::InputTooLong(self.config.max_input_chars));
        }
        Ok(text)
    }
}

fn parse_confirmation(raw: &str) -> Result<bool, ValidationError> {
    let answer = raw.trim().to_lowercase();
    if answer.is_empty() {
        Err(ValidationError::EmptyInput)
    } else if YES.contains(&answer.as_str()) {
        Ok(true)
    } else if NO.contains(&answer.as_str()) {
        Ok(false)
    } else {
        Err(ValidationError::UnrecognizedConfirmation(raw.trim().to_string()))
    }
}
