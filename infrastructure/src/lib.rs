//! Infrastructure layer for parley
//!
//! This crate contains the adapters behind the application ports: the
//! Gemini REST gateway, configuration loading, secret resolution, and
//! the JSONL conversation logger.

pub mod config;
pub mod logging;
pub mod providers;
pub mod secrets;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::gemini::GeminiGateway;
pub use secrets::{resolve_api_key, EnvSecretStore, FALLBACK_API_KEY_ENV};
