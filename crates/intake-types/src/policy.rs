//! Scope policy embedded in every model call.
//!
//! The policy is instruction for the model, never conversation content:
//! it is rendered into the system prompt and must not reach the transcript.

use serde::{Deserialize, Serialize};

/// Topic-scoping and refusal rules for the assistant.
///
/// Loaded once from `[policy]` in `config.toml`; any omitted field falls back
/// to the post-surgery adhesion tracker defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDirective {
    /// Who the assistant is, phrased to follow "You are ...".
    pub assistant_role: String,
    /// Subject matter the assistant may discuss.
    pub allowed_topics: Vec<String>,
    /// What to do when the user asks about something outside `allowed_topics`.
    pub redirect_rule: String,
    /// What to refuse outright.
    pub refusal_rule: String,
}

impl Default for PolicyDirective {
    fn default() -> Self {
        Self {
            assistant_role: "a medical assistant specialized in post-surgery adhesion detection"
                .to_string(),
            allowed_topics: vec![
                "symptoms".to_string(),
                "affected body regions".to_string(),
                "related post-surgery guidance".to_string(),
            ],
            redirect_rule: "Politely redirect the user back to their symptoms if the query is \
                unrelated to the allowed topics."
                .to_string(),
            refusal_rule: "Do not provide a diagnosis, name a definitive condition, or recommend \
                medication or dosages. Encourage the user to consult their surgeon or physician \
                for those."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_has_rules() {
        let policy = PolicyDirective::default();
        assert!(policy.assistant_role.contains("adhesion"));
        assert_eq!(policy.allowed_topics.len(), 3);
        assert!(policy.redirect_rule.contains("redirect"));
        assert!(policy.refusal_rule.contains("diagnosis"));
    }

    #[test]
    fn test_partial_policy_keeps_defaults() {
        let toml_str = r#"assistant_role = "a travel advisor for rail journeys in Europe""#;
        let policy: PolicyDirective = toml::from_str(toml_str).unwrap();
        assert_eq!(policy.assistant_role, "a travel advisor for rail journeys in Europe");
        assert_eq!(policy.allowed_topics, PolicyDirective::default().allowed_topics);
    }
}
