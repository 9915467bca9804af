//! TOML config file loading and creation.

use crate::schema::AmikoConfig;
use crate::validation;
use amiko_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<AmikoConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: AmikoConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(AmikoConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/amiko/config.toml`
/// On Linux: `~/.config/amiko/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<AmikoConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(AmikoConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("amiko").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = default_config_toml();

    std::fs::write(path, content).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    r##"# Amiko Configuration
# Only override what you want to change -- missing fields use defaults.
# The API key is NOT configured here: set GEMINI_API_KEY in the environment
# (or a .env file next to the binary / project root).

[model]
# name = "gemini-2.5-flash"
# max_tokens = 4096       # 1-65536
# temperature = 0.7       # 0.0-2.0

[persona]
# All persona fields are optional; unset fields use the built-in companion.
# name = "Amiko"
# instruction = "You are a warm, playful companion..."
# acknowledgement = "Hi! So happy to meet you!"
# greeting = "Hi there! Let's chat!"
# fallback = "Sorry, I'm having trouble connecting right now."
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("amiko-test-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_from_path(Path::new("/nonexistent/amiko.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let path = temp_config("bad.toml", "[model\nname = ");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn partial_file_loads_with_defaults() {
        let path = temp_config("partial.toml", "[model]\ntemperature = 1.0\n");
        let config = load_from_path(&path).unwrap();
        assert!((config.model.temperature - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.model.name, "gemini-2.5-flash");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let path = temp_config("invalid.toml", "[model]\ntemperature = 9.0\n");
        let config = load_from_path(&path).unwrap();
        // Validation failed, loader returns defaults instead
        assert!((config.model.temperature - 0.7).abs() < f64::EPSILON);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn default_toml_template_parses_to_defaults() {
        let config: AmikoConfig = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert!(config.persona.name.is_none());
    }
}
