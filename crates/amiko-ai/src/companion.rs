//! Session manager + message dispatcher.
//!
//! `Companion` owns the one remote conversational context for the process:
//! it lazily opens a client through a [`SessionFactory`] on first send,
//! caches it on success, and retries creation on every send after a failure.
//! There is no module-level global; the orchestration layer constructs one
//! `Companion` and keeps it.

use tracing::{error, warn};

use crate::gemini::{GeminiClient, GeminiConfig};
use crate::persona::Persona;
use crate::session::ChatSession;
use crate::{AiClient, ChatError, ChunkHandler};

/// Environment variable holding the Gemini API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Creates the remote client. The seam that makes session creation
/// observable (and mockable) to callers.
pub trait SessionFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn AiClient>, ChatError>;
}

/// Production factory: reads the API credential from the environment at
/// open() time and builds a Gemini client.
pub struct GeminiFactory {
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl GeminiFactory {
    pub fn new(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature,
        }
    }
}

impl SessionFactory for GeminiFactory {
    fn open(&self) -> Result<Box<dyn AiClient>, ChatError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                error!("{API_KEY_ENV} is not set in environment variables");
                ChatError::ConfigurationMissing(format!("{API_KEY_ENV} is not set"))
            })?;

        let config = GeminiConfig::new(api_key)
            .with_model(&self.model)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);
        Ok(Box::new(GeminiClient::new(config)))
    }
}

/// The companion: a persona-primed session over a lazily-created client.
pub struct Companion {
    factory: Box<dyn SessionFactory>,
    client: Option<Box<dyn AiClient>>,
    session: ChatSession,
}

impl Companion {
    pub fn new(persona: &Persona, factory: Box<dyn SessionFactory>) -> Self {
        Self {
            factory,
            client: None,
            session: ChatSession::primed(&persona.instruction, &persona.acknowledgement),
        }
    }

    /// Forward one user message and await one reply.
    ///
    /// A single round trip: failures surface immediately, nothing is
    /// retried here. A fresh send is the only retry mechanism.
    pub async fn send(&mut self, text: &str) -> Result<String, ChatError> {
        self.ensure_client()?;
        let client = self
            .client
            .as_deref()
            .ok_or(ChatError::SessionUnavailable)?;

        self.session.chat(client, text).await.map_err(|e| {
            warn!("remote round trip failed: {e}");
            ChatError::RemoteCallFailed(e)
        })
    }

    /// Like [`send`](Self::send), delivering the reply chunk by chunk.
    pub async fn send_streaming(
        &mut self,
        text: &str,
        on_chunk: ChunkHandler,
    ) -> Result<String, ChatError> {
        self.ensure_client()?;
        let client = self
            .client
            .as_deref()
            .ok_or(ChatError::SessionUnavailable)?;

        self.session
            .chat_streaming(client, text, on_chunk)
            .await
            .map_err(|e| {
                warn!("remote round trip failed: {e}");
                ChatError::RemoteCallFailed(e)
            })
    }

    /// The session history, priming turns included.
    pub fn history_len(&self) -> usize {
        self.session.message_count()
    }

    /// Open the client on first use. Failures are not cached: every send
    /// after a failed creation retries it.
    fn ensure_client(&mut self) -> Result<(), ChatError> {
        if self.client.is_some() {
            return Ok(());
        }
        match self.factory.open() {
            Ok(client) => {
                self.client = Some(client);
                Ok(())
            }
            Err(e) => {
                error!("failed to open chat session: {e}");
                Err(e)
            }
        }
    }
}
