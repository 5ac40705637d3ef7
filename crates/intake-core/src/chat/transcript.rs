//! Append-only transcript for one session.
//!
//! Turns are assigned ids at append time and can never be edited or removed.
//! A reset discards the whole transcript rather than clearing it in place.

use chrono::Utc;

use intake_types::turn::{Speaker, Turn};

/// Ordered log of turns. Insertion order is the conversation order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return a reference to it.
    ///
    /// Ids continue from the last turn, starting at 1.
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) -> &Turn {
        let id = self.turns.last().map_or(1, |t| t.id + 1);
        self.turns.push(Turn {
            id,
            speaker,
            text: text.into(),
            created_at: Utc::now(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Turns appended after the turn with `id` (all turns when `id` is 0).
    pub fn since(&self, id: u64) -> &[Turn] {
        let start = self.turns.partition_point(|t| t.id <= id);
        &self.turns[start..]
    }

    /// Id of the newest turn, or 0 for an empty transcript.
    pub fn last_id(&self) -> u64 {
        self.turns.last().map_or(0, |t| t.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert_eq!(transcript.last_id(), 0);
        assert!(transcript.last().is_none());
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let mut transcript = Transcript::new();
        let first = transcript.append(Speaker::User, "hello").id;
        let second = transcript.append(Speaker::Assistant, "hi").id;
        let third = transcript.append(Speaker::User, "more").id;

        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().text, "more");
    }

    #[test]
    fn test_append_preserves_order_and_speaker() {
        let mut transcript = Transcript::new();
        transcript.append(Speaker::User, "q");
        transcript.append(Speaker::Assistant, "a");

        let speakers: Vec<Speaker> = transcript.turns().iter().map(|t| t.speaker).collect();
        assert_eq!(speakers, vec![Speaker::User, Speaker::Assistant]);
    }

    #[test]
    fn test_since_returns_delta() {
        let mut transcript = Transcript::new();
        transcript.append(Speaker::User, "one");
        transcript.append(Speaker::Assistant, "two");
        let mark = transcript.last_id();
        transcript.append(Speaker::User, "three");
        transcript.append(Speaker::Assistant, "four");

        let delta = transcript.since(mark);
        assert_eq!(delta.len(), 2);
        assert_eq!(delta[0].text, "three");
        assert_eq!(delta[1].text, "four");

        assert_eq!(transcript.since(0).len(), 4);
        assert!(transcript.since(transcript.last_id()).is_empty());
    }
}
