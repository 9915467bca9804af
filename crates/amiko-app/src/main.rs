mod chat_loop;
mod cli;
mod controller;

use tracing_subscriber::EnvFilter;

use amiko_ai::{Companion, GeminiFactory, Persona};
use amiko_config::AmikoConfig;
use controller::ChatController;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root — two levels up from crates/amiko-app/
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn load_config(args: &cli::Args) -> AmikoConfig {
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
        match amiko_config::load_from_path(std::path::Path::new(path)) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!("Config load failed, using defaults: {e}");
                return AmikoConfig::default();
            }
        }
    }
    amiko_config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AmikoConfig::default()
    })
}

/// Build the persona from defaults plus config overrides.
fn build_persona(config: &AmikoConfig) -> Persona {
    let mut persona = Persona::default();
    let overrides = &config.persona;
    if let Some(ref name) = overrides.name {
        persona.name = name.clone();
    }
    if let Some(ref instruction) = overrides.instruction {
        persona.instruction = instruction.clone();
    }
    if let Some(ref acknowledgement) = overrides.acknowledgement {
        persona.acknowledgement = acknowledgement.clone();
    }
    if let Some(ref greeting) = overrides.greeting {
        persona.greeting = greeting.clone();
    }
    if let Some(ref fallback) = overrides.fallback {
        persona.fallback = fallback.clone();
    }
    persona
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file before anything else
    load_dotenv();

    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("amiko=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "amiko=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Amiko v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args);
    let persona = build_persona(&config);

    let model = args.model.clone().unwrap_or_else(|| config.model.name.clone());
    tracing::info!("Using model {model}");

    let factory = GeminiFactory::new(model, config.model.max_tokens, config.model.temperature);
    let companion = Companion::new(&persona, Box::new(factory));
    let mut controller = ChatController::new(&persona, companion);

    let streaming = !args.no_stream;

    if let Some(ref message) = args.message {
        chat_loop::send(&mut controller, &persona.name, message, streaming).await;
        return Ok(());
    }

    chat_loop::run(&mut controller, &persona.name, streaming).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_overrides_apply() {
        let mut config = AmikoConfig::default();
        config.persona.name = Some("Nova".into());
        config.persona.greeting = Some("hey!".into());

        let persona = build_persona(&config);
        assert_eq!(persona.name, "Nova");
        assert_eq!(persona.greeting, "hey!");
        // Unset fields keep the built-in persona
        assert_eq!(persona.fallback, Persona::default().fallback);
    }
}
