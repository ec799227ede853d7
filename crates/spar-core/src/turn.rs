//! Conversation turns
//!
//! A [`ConversationTurn`] is one message of a debate. Histories are handed to
//! the orchestration core as read-only slices, oldest turn first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human participant
    User,
    /// The generated opponent
    #[serde(alias = "ai", alias = "model")]
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Author of the message
    pub sender: Sender,
    /// Message text
    pub content: String,
    /// When the message was recorded
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn stamped with the current time
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content)
    }

    /// Compact `sender:content` form, content cut to `max_chars` characters.
    ///
    /// Used when fingerprinting histories for the cache.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let head: String = self.content.chars().take(max_chars).collect();
        format!("{}:{}", self.sender, head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let turn = ConversationTurn::user("héllo wörld");
        assert_eq!(turn.excerpt(5), "user:héllo");
        assert_eq!(turn.excerpt(100), "user:héllo wörld");
    }

    #[test]
    fn test_sender_accepts_legacy_ai_label() {
        let json = r#"{"sender":"ai","content":"hi","createdAt":"2024-01-01T00:00:00Z"}"#;
        let turn: ConversationTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.sender, Sender::Assistant);
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Assistant.to_string(), "assistant");
    }
}
