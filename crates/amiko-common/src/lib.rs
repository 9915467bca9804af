pub mod errors;
pub mod transcript;

pub use errors::{AmikoError, ConfigError};
pub use transcript::{Author, ChatMessage, Transcript};

pub type Result<T> = std::result::Result<T, AmikoError>;
