//! Debate session transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::turn::{ConversationTurn, Sender};

/// A debate between a user and the generated opponent.
///
/// Turns are append-only; storing sessions is the caller's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSession {
    /// Unique ID
    pub id: Uuid,
    /// The topic the debate was opened with
    pub topic: String,
    /// When the session was opened
    pub created_at: DateTime<Utc>,
    turns: Vec<ConversationTurn>,
}

impl DebateSession {
    /// Create an empty session for a topic
    pub fn new(topic: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: topic.to_string(),
            created_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    /// Append a turn to the transcript
    pub fn push(&mut self, sender: Sender, content: impl Into<String>) {
        self.turns.push(ConversationTurn::new(sender, content));
    }

    /// The ordered history, oldest first
    pub fn history(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Most recent turn, if any
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
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
    fn test_session_lifecycle() {
        let mut session = DebateSession::new("Is pineapple a good pizza topping?");
        assert!(session.is_empty());

        session.push(Sender::User, "Is pineapple a good pizza topping?");
        session.push(Sender::Assistant, "Absolutely not, and here is why.");

        assert_eq!(session.len(), 2);
        assert_eq!(session.history()[0].sender, Sender::User);
        assert_eq!(session.last().map(|t| t.sender), Some(Sender::Assistant));
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = DebateSession::new("topic");
        let b = DebateSession::new("topic");
        assert_ne!(a.id, b.id);
    }
}
