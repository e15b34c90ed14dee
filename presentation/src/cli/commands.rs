//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for parley
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about = "Interactive chat assistant backed by the Gemini API")]
#[command(long_about = r#"
Parley starts an interactive chat session against a Gemini model. The
conversation history is kept in memory for the session and replayed to
the model on every message so it keeps context.

The API key is read from the environment variable named by
auth.api_key_env in the config (GEMINI_API_KEY by default, with
GOOGLE_API_KEY as a fallback).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./parley.toml       Project-level config
3. ~/.config/parley/config.toml   Global config

Example:
  parley
  parley -m gemini-1.5-pro
  parley --system "You are a professional translator"
"#)]
pub struct Cli {
    /// Model to chat with
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// System instruction sent with every request
    #[arg(long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the reply spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
