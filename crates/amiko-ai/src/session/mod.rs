//! Conversation session management.
//!
//! A `ChatSession` holds the conversation history sent to the model,
//! including the persona priming turns, and guards against overlapping
//! requests.

mod chat;
mod manager;
mod types;

pub use manager::ChatSession;
