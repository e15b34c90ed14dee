//! Port for secret retrieval.
//!
//! The API credential is the only secret parley needs. It is resolved
//! once at startup; a missing credential is a fatal configuration error
//! reported to the operator before any session begins.

/// Read-only store of named secrets.
///
/// Implementations must never log or echo secret values — error paths
/// report the key name only.
pub trait SecretStore: Send + Sync {
    /// Look up a secret by key. `None` means absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory implementation for tests and programmatic wiring.
pub struct StaticSecretStore {
    entries: std::collections::HashMap<String, String>,
}

impl StaticSecretStore {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl SecretStore for StaticSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
