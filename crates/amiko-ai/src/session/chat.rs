//! Async chat methods for ChatSession (send_message + streaming).

use tracing::debug;

use crate::{AiClient, AiError, ChunkHandler, Message, Role};

use super::manager::ChatSession;
use super::types::BusyGuard;

impl ChatSession {
    /// Add a user message and get the assistant's response.
    ///
    /// One round trip, no retries. A second call while one is in flight
    /// fails with `AiError::Busy`.
    pub async fn chat(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.messages.push(Message {
            role: Role::User,
            content: user_message.into(),
        });

        let response = client.send_message(&self.messages).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "round trip complete"
        );

        self.messages.push(Message {
            role: Role::Assistant,
            content: response.content.clone(),
        });

        Ok(response.content)
    }

    /// Send a message with streaming, returning the full response.
    pub async fn chat_streaming(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
        on_chunk: ChunkHandler,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.messages.push(Message {
            role: Role::User,
            content: user_message.into(),
        });

        let response = client.send_message_streaming(&self.messages, on_chunk).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "streaming round trip complete"
        );

        self.messages.push(Message {
            role: Role::Assistant,
            content: response.content.clone(),
        });

        Ok(response.content)
    }
}
