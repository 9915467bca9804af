//! Amiko configuration system.
//!
//! TOML-based configuration with serde defaults, so a partial (or absent)
//! config file works out of the box. The API credential is never part of the
//! config file; it comes from the process environment.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AmikoConfig, ModelConfig, PersonaConfig};
pub use toml_loader::{default_config_path, load_from_path};

use amiko_common::ConfigError;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a commented
/// default file if none exists, and validates the result.
pub fn load_config() -> Result<AmikoConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
