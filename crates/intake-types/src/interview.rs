//! Interview progress types.
//!
//! `InterviewState` is a tagged variant: each step carries exactly the facts
//! collected so far, so a category or initial detail cannot be observed
//! before the step that records it.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Fieldless discriminant of [`InterviewState`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStep {
    AwaitingConfirmation,
    CategorySelection,
    DetailEntry,
    OpenDialogue,
    Declined,
}

impl fmt::Display for InterviewStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewStep::AwaitingConfirmation => write!(f, "awaiting_confirmation"),
            InterviewStep::CategorySelection => write!(f, "category_selection"),
            InterviewStep::DetailEntry => write!(f, "detail_entry"),
            InterviewStep::OpenDialogue => write!(f, "open_dialogue"),
            InterviewStep::Declined => write!(f, "declined"),
        }
    }
}

/// A category chosen from the configured fixed set (e.g. a body region).
///
/// `Category::new` does not check membership; the interview machine only
/// builds categories after matching input against the configured set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a session is in the interview, with the facts collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum InterviewState {
    #[default]
    AwaitingConfirmation,
    CategorySelection,
    DetailEntry {
        category: Category,
    },
    OpenDialogue {
        category: Category,
        initial_detail: String,
    },
    /// Terminal until an explicit reset.
    Declined,
}

impl InterviewState {
    pub fn step(&self) -> InterviewStep {
        match self {
            InterviewState::AwaitingConfirmation => InterviewStep::AwaitingConfirmation,
            InterviewState::CategorySelection => InterviewStep::CategorySelection,
            InterviewState::DetailEntry { .. } => InterviewStep::DetailEntry,
            InterviewState::OpenDialogue { .. } => InterviewStep::OpenDialogue,
            InterviewState::Declined => InterviewStep::Declined,
        }
    }

    /// The selected category, once the category step has been passed.
    pub fn category(&self) -> Option<&Category> {
        match self {
            InterviewState::DetailEntry { category }
            | InterviewState::OpenDialogue { category, .. } => Some(category),
            _ => None,
        }
    }

    /// The initial detail, once the detail step has been passed.
    pub fn initial_detail(&self) -> Option<&str> {
        match self {
            InterviewState::OpenDialogue { initial_detail, .. } => Some(initial_detail),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InterviewState::Declined)
    }
}
