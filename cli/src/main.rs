//! CLI entrypoint for parley
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Result};
use clap::Parser;
use parley_application::ChatTurnUseCase;
use parley_domain::Model;
use parley_infrastructure::{
    resolve_api_key, ConfigLoader, EnvSecretStore, GeminiGateway, JsonlConversationLogger,
    FALLBACK_API_KEY_ENV,
};
use parley_presentation::{ChatRepl, Cli};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(c) => c,
            Err(e) => bail!("Failed to load configuration: {}", e),
        }
    };

    if let Err(e) = config.validate() {
        bail!("Invalid configuration: {}", e);
    }

    // CLI flags override file configuration
    let model: Model = match &cli.model {
        Some(name) => name.parse().unwrap(),
        None => config.model.name.clone(),
    };
    let system_instruction = cli
        .system
        .clone()
        .or_else(|| config.model.system_instruction.clone());

    // Resolve the API key before anything else: a missing credential is
    // fatal and must abort before a session starts.
    let secrets = EnvSecretStore::new();
    let api_key = match resolve_api_key(&secrets, &config.auth.api_key_env) {
        Some(key) => key,
        None => bail!(
            "No API key found: set {} (or {}) in the environment",
            config.auth.api_key_env,
            FALLBACK_API_KEY_ENV
        ),
    };

    info!("Starting parley with model {}", model);

    // === Dependency Injection ===
    // Create infrastructure adapter (Gemini gateway)
    let mut gateway = GeminiGateway::new(api_key, model.clone(), config.generation.to_params());
    if let Some(instruction) = system_instruction {
        gateway = gateway.with_system_instruction(instruction);
    }

    // Create use case with injected gateway
    let mut use_case = ChatTurnUseCase::new(Arc::new(gateway));

    if let Some(ref log_path) = config.repl.conversation_log {
        if let Some(logger) = JsonlConversationLogger::new(log_path) {
            info!("Conversation log: {}", logger.path().display());
            use_case = use_case.with_conversation_logger(Arc::new(logger));
        }
    }

    let repl = ChatRepl::new(use_case, model)
        .with_progress(!cli.quiet)
        .with_history_file(config.repl.history_file.as_ref().map(PathBuf::from));

    repl.run().await?;

    Ok(())
}
