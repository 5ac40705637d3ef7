//! Transcript turn types.
//!
//! A turn is one immutable utterance attributed to either the user or the
//! assistant. Turns are created only by the transcript, which assigns ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Speaker::User),
            "assistant" => Ok(Speaker::Assistant),
            other => Err(format!("invalid speaker: '{other}'")),
        }
    }
}

/// One transcript entry.
///
/// `id` is unique within a session and increases with every append;
/// a fresh transcript starts at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: u64,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_display_and_parse() {
        assert_eq!(Speaker::User.to_string(), "user");
        assert_eq!("Assistant".parse::<Speaker>().unwrap(), Speaker::Assistant);
        assert!("system".parse::<Speaker>().is_err());
    }

    #[test]
    fn test_speaker_serde() {
        let json = serde_json::to_string(&Speaker::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_turn_serialize() {
        let turn = Turn {
            id: 1,
            speaker: Speaker::User,
            text: "Symptoms: bloating. Affected region: Abdomen.".to_string(),
            created_at: Utc::now(),
        };
        assert!(turn.is_user());
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"speaker\":\"user\""));
        assert!(json.contains("\"id\":1"));
    }
}
