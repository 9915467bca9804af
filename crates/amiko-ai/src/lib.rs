//! AI engine for Amiko.
//!
//! Provides a Gemini API client with:
//! - Streaming (SSE) support
//! - Persona-primed chat sessions
//! - A lazily-created, cached session manager ([`Companion`])

pub mod companion;
pub mod gemini;
pub mod persona;
pub mod session;
pub mod streaming;

use async_trait::async_trait;

pub use companion::{Companion, GeminiFactory, SessionFactory, API_KEY_ENV};
pub use gemini::{GeminiClient, GeminiConfig};
pub use persona::Persona;
pub use session::ChatSession;

/// A chunk-by-chunk callback for streaming replies.
pub type ChunkHandler = Box<dyn Fn(String) + Send + Sync>;

#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: ChunkHandler,
    ) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Session is busy with another request")]
    Busy,
}

/// Failures surfaced by the [`Companion`] send path.
///
/// All three kinds are caught at the orchestration boundary and turned into
/// the persona's fallback text; the cause only reaches the logs.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("chat session unavailable")]
    SessionUnavailable,
    #[error("remote call failed: {0}")]
    RemoteCallFailed(#[from] AiError),
}
