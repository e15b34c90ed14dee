//! Secret store backed by process environment variables.
//!
//! The API key never lives in a config file; the config names the
//! environment variable and this store resolves it at startup.

use parley_application::SecretStore;
use tracing::debug;

/// [`SecretStore`] implementation over process environment variables.
///
/// Empty values are treated as absent: an `export GEMINI_API_KEY=`
/// leftover should fail startup the same way a missing variable does.
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for EnvSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            _ => {
                debug!("Secret '{}' not set in environment", key);
                None
            }
        }
    }
}

/// Fallback variable some environments export the key under.
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Resolve the API key from the configured variable, then the fallback.
///
/// `None` here is a fatal configuration error: the caller must abort
/// startup before any session begins.
pub fn resolve_api_key(store: &dyn SecretStore, primary: &str) -> Option<String> {
    store
        .get(primary)
        .or_else(|| store.get(FALLBACK_API_KEY_ENV))
}
