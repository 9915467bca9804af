//! Append-only conversation transcript.
//!
//! The transcript is the display-facing record of the conversation: it only
//! ever grows, entries are immutable once appended, and insertion order is
//! display order.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Companion,
}

/// A single transcript entry. Immutable after append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::User,
            timestamp: Local::now(),
        }
    }

    pub fn companion(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::Companion,
            timestamp: Local::now(),
        }
    }
}

/// Ordered, append-only sequence of chat messages.
///
/// Starts with a single synthetic greeting from the companion. Entries are
/// never removed or reordered.
#[derive(Debug)]
pub struct Transcript {
    entries: Vec<ChatMessage>,
}

impl Transcript {
    /// Create a transcript seeded with the companion's greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            entries: vec![ChatMessage::companion(greeting)],
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(ChatMessage::user(text));
    }

    pub fn push_companion(&mut self, text: impl Into<String>) {
        self.entries.push(ChatMessage::companion(text));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }
}
