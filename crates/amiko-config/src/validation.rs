//! Configuration validation.

use crate::schema::AmikoConfig;
use amiko_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AmikoConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if config.model.name.trim().is_empty() {
        errors.push("model.name must not be empty".to_string());
    }
    validate_range(
        &mut errors,
        "model.max_tokens",
        config.model.max_tokens,
        1,
        65536,
    );
    validate_range_f64(
        &mut errors,
        "model.temperature",
        config.model.temperature,
        0.0,
        2.0,
    );

    // Persona overrides may be absent, but never blank
    validate_not_blank(&mut errors, "persona.name", &config.persona.name);
    validate_not_blank(&mut errors, "persona.instruction", &config.persona.instruction);
    validate_not_blank(
        &mut errors,
        "persona.acknowledgement",
        &config.persona.acknowledgement,
    );
    validate_not_blank(&mut errors, "persona.greeting", &config.persona.greeting);
    validate_not_blank(&mut errors, "persona.fallback", &config.persona.fallback);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, field: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{field} must be between {min} and {max}, got {value}"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        errors.push(format!("{field} must be between {min} and {max}, got {value}"));
    }
}

fn validate_not_blank(errors: &mut Vec<String>, field: &str, value: &Option<String>) {
    if let Some(v) = value {
        if v.trim().is_empty() {
            errors.push(format!("{field} must not be blank when set"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AmikoConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&AmikoConfig::default()).is_ok());
    }

    #[test]
    fn temperature_out_of_range_rejected() {
        let mut config = AmikoConfig::default();
        config.model.temperature = 2.5;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("model.temperature"));
    }

    #[test]
    fn nan_temperature_rejected() {
        let mut config = AmikoConfig::default();
        config.model.temperature = f64::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn zero_max_tokens_rejected() {
        let mut config = AmikoConfig::default();
        config.model.max_tokens = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("model.max_tokens"));
    }

    #[test]
    fn blank_persona_override_rejected() {
        let mut config = AmikoConfig::default();
        config.persona.greeting = Some("   ".to_string());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("persona.greeting"));
    }

    #[test]
    fn multiple_errors_collected() {
        let mut config = AmikoConfig::default();
        config.model.name = String::new();
        config.model.max_tokens = 0;
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("model.name"));
        assert!(msg.contains("model.max_tokens"));
    }
}
