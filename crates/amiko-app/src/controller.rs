//! Orchestration between user input, the companion, and the transcript.
//!
//! One send at a time: the controller holds an explicit `SendState` so the
//! at-most-one-in-flight rule is a checkable state, not an implicit flag.
//! Every completed send appends exactly two transcript entries: the user's
//! message immediately, then the reply or the persona fallback on settle.

use tracing::error;

use amiko_ai::{ChunkHandler, Companion, Persona};
use amiko_common::Transcript;

/// Whether a send is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
}

/// What `submit` did with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A send completed (reply or fallback appended).
    Sent,
    /// Input was blank after trimming; nothing happened.
    Empty,
    /// A send was already in flight; nothing happened.
    Busy,
}

/// Resets the state to Idle when the send settles, even if the future
/// is dropped mid-flight.
struct SendingGuard<'a> {
    state: &'a mut SendState,
}

impl<'a> SendingGuard<'a> {
    fn enter(state: &'a mut SendState) -> Self {
        *state = SendState::Sending;
        Self { state }
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        *self.state = SendState::Idle;
    }
}

pub struct ChatController {
    transcript: Transcript,
    state: SendState,
    companion: Companion,
    fallback: String,
}

impl ChatController {
    pub fn new(persona: &Persona, companion: Companion) -> Self {
        Self {
            transcript: Transcript::with_greeting(&persona.greeting),
            state: SendState::Idle,
            companion,
            fallback: persona.fallback.clone(),
        }
    }

    /// Submit one user message.
    ///
    /// Blank input and input arriving while a send is in flight are no-ops;
    /// the transcript is untouched. Failures never escape: the user sees the
    /// fallback text, the cause goes to the logs.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.state == SendState::Sending {
            return SubmitOutcome::Busy;
        }

        self.transcript.push_user(text);
        let _guard = SendingGuard::enter(&mut self.state);

        match self.companion.send(text).await {
            Ok(reply) => self.transcript.push_companion(reply),
            Err(e) => {
                error!("send failed: {e}");
                self.transcript.push_companion(self.fallback.clone());
            }
        }
        SubmitOutcome::Sent
    }

    /// Like [`submit`](Self::submit), delivering the reply chunk by chunk.
    pub async fn submit_streaming(&mut self, text: &str, on_chunk: ChunkHandler) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.state == SendState::Sending {
            return SubmitOutcome::Busy;
        }

        self.transcript.push_user(text);
        let _guard = SendingGuard::enter(&mut self.state);

        match self.companion.send_streaming(text, on_chunk).await {
            Ok(reply) => self.transcript.push_companion(reply),
            Err(e) => {
                error!("send failed: {e}");
                self.transcript.push_companion(self.fallback.clone());
            }
        }
        SubmitOutcome::Sent
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending(&self) -> bool {
        self.state == SendState::Sending
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use amiko_ai::{
        AiClient, AiError, AiResponse, ChatError, Message, SessionFactory, TokenUsage,
    };
    use amiko_common::Author;

    use super::*;

    struct EchoClient;

    #[async_trait]
    impl AiClient for EchoClient {
        async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(AiResponse {
                content: format!("echo: {last}"),
                usage: TokenUsage::default(),
            })
        }

        async fn send_message_streaming(
            &self,
            messages: &[Message],
            on_chunk: ChunkHandler,
        ) -> Result<AiResponse, AiError> {
            let response = self.send_message(messages).await?;
            on_chunk(response.content.clone());
            Ok(response)
        }
    }

    struct EchoFactory;
    impl SessionFactory for EchoFactory {
        fn open(&self) -> Result<Box<dyn AiClient>, ChatError> {
            Ok(Box::new(EchoClient))
        }
    }

    /// Factory that never produces a client, like a missing credential.
    struct UnavailableFactory;
    impl SessionFactory for UnavailableFactory {
        fn open(&self) -> Result<Box<dyn AiClient>, ChatError> {
            Err(ChatError::ConfigurationMissing("GEMINI_API_KEY is not set".into()))
        }
    }

    fn controller_with<F: SessionFactory + 'static>(factory: F) -> ChatController {
        let persona = Persona::default();
        let companion = Companion::new(&persona, Box::new(factory));
        ChatController::new(&persona, companion)
    }

    #[tokio::test]
    async fn transcript_starts_with_greeting_only() {
        let controller = controller_with(EchoFactory);
        assert_eq!(controller.transcript().len(), 1);
        assert_eq!(controller.transcript().messages()[0].author, Author::Companion);
        assert!(!controller.pending());
    }

    #[tokio::test]
    async fn completed_send_appends_exactly_two_entries() {
        let mut controller = controller_with(EchoFactory);

        let outcome = controller.submit("Hi!").await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        let msgs = controller.transcript().messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].author, Author::User);
        assert_eq!(msgs[1].text, "Hi!");
        assert_eq!(msgs[2].author, Author::Companion);
        assert_eq!(msgs[2].text, "echo: Hi!");
        assert!(!controller.pending());
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let mut controller = controller_with(EchoFactory);

        assert_eq!(controller.submit("").await, SubmitOutcome::Empty);
        assert_eq!(controller.submit("   \t").await, SubmitOutcome::Empty);
        assert_eq!(controller.transcript().len(), 1);
    }

    #[tokio::test]
    async fn submit_while_sending_is_rejected() {
        let mut controller = controller_with(EchoFactory);
        controller.state = SendState::Sending;

        let outcome = controller.submit("hello?").await;

        assert_eq!(outcome, SubmitOutcome::Busy);
        assert_eq!(controller.transcript().len(), 1);
    }

    #[tokio::test]
    async fn missing_configuration_yields_fallback_text() {
        let mut controller = controller_with(UnavailableFactory);

        let outcome = controller.submit("hello").await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        let msgs = controller.transcript().messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[2].author, Author::Companion);
        assert_eq!(msgs[2].text, Persona::default().fallback);
        assert!(!controller.pending());
    }

    #[tokio::test]
    async fn repeated_sends_grow_transcript_by_two_each() {
        let mut controller = controller_with(EchoFactory);

        for i in 0..3 {
            controller.submit(&format!("msg {i}")).await;
        }

        assert_eq!(controller.transcript().len(), 1 + 3 * 2);
        // Order is preserved: user and companion entries alternate
        let authors: Vec<_> = controller
            .transcript()
            .messages()
            .iter()
            .map(|m| m.author)
            .collect();
        assert_eq!(
            authors,
            [
                Author::Companion,
                Author::User,
                Author::Companion,
                Author::User,
                Author::Companion,
                Author::User,
                Author::Companion,
            ]
        );
    }

    #[tokio::test]
    async fn streaming_submit_appends_full_reply() {
        let mut controller = controller_with(EchoFactory);
        let chunks = std::sync::Arc::new(std::sync::Mutex::new(String::new()));
        let sink = chunks.clone();

        let outcome = controller
            .submit_streaming("stream me", Box::new(move |c| sink.lock().unwrap().push_str(&c)))
            .await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(controller.transcript().last().unwrap().text, "echo: stream me");
        assert_eq!(*chunks.lock().unwrap(), "echo: stream me");
    }
}
