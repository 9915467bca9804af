//! Configuration schema types.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Every section uses serde defaults so a partial TOML file works.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmikoConfig {
    pub model: ModelConfig,
    pub persona: PersonaConfig,
}

/// Generation model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Gemini model name.
    pub name: String,
    /// Maximum output tokens per reply (valid range: 1-65536).
    pub max_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.5-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Persona text overrides.
///
/// Unset fields fall back to the built-in companion persona. All set fields
/// must be non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Display name used in the chat prompt.
    pub name: Option<String>,
    /// Priming instruction describing tone and behavior.
    pub instruction: Option<String>,
    /// Canned first assistant utterance seeded into the session history.
    pub acknowledgement: Option<String>,
    /// Greeting shown at the top of the transcript.
    pub greeting: Option<String>,
    /// Text shown in place of a reply when anything fails.
    pub fallback: Option<String>,
}
