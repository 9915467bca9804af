//! Session struct and history management.

use std::sync::atomic::AtomicBool;

use crate::{Message, Role};

/// A conversation session: the message history sent with every round trip.
///
/// A primed session starts with two seed turns (the persona instruction and
/// the canned acknowledgement), mirroring a server-side conversational
/// context opened with seed history.
pub struct ChatSession {
    /// Conversation message history, including priming turns.
    pub(super) messages: Vec<Message>,
    /// Whether the session is currently processing a request.
    pub(super) busy: AtomicBool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            busy: AtomicBool::new(false),
        }
    }

    /// Create a session primed with a persona instruction turn and the
    /// assistant's canned acknowledgement.
    pub fn primed(instruction: impl Into<String>, acknowledgement: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message {
                    role: Role::User,
                    content: instruction.into(),
                },
                Message {
                    role: Role::Assistant,
                    content: acknowledgement.into(),
                },
            ],
            busy: AtomicBool::new(false),
        }
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in history, priming turns included.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
