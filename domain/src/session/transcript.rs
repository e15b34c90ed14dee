//! Append-only conversation transcript

use super::entities::Turn;
use serde::{Deserialize, Serialize};

/// The ordered history of one chat session (Entity)
///
/// Insertion order is chronological order. The transcript only grows:
/// there are no delete, update, or reorder operations. Turns conceptually
/// alternate user/model but alternation is not enforced here — a failed
/// remote call legitimately leaves two consecutive user turns.
///
/// One transcript is exclusively owned by one session loop, so no
/// synchronization is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript (session start)
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a turn to the end of the history. Never fails.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Full history in chronological order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Every turn except the most recently appended one.
    ///
    /// This is the replay context sent to the remote model before the
    /// newest user turn: the newest turn is delivered as the message
    /// itself, not as history. Returns the empty slice when the
    /// transcript holds zero or one turns.
    pub fn replay_context(&self) -> &[Turn] {
        match self.turns.len() {
            0 => &[],
            n => &self.turns[..n - 1],
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
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
        assert!(transcript.replay_context().is_empty());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("first"));
        transcript.push(Turn::model("second"));
        transcript.push(Turn::user("third"));

        let contents: Vec<&str> = transcript
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_replay_context_excludes_last() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("Hello"));
        transcript.push(Turn::model("Hi there"));
        transcript.push(Turn::user("Bye"));

        let context = transcript.replay_context();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0], Turn::user("Hello"));
        assert_eq!(context[1], Turn::model("Hi there"));
        // The transcript itself is untouched
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_replay_context_on_single_turn() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("Hello"));
        assert!(transcript.replay_context().is_empty());
    }
}
