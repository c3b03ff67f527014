//! Credential storage configuration.

use serde::{Deserialize, Serialize};

/// Where the bearer credential is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// OS keychain, then `DIGMAP_AUTH__TOKEN`, then the credentials file.
    #[default]
    Tiered,
    File,
    Keyring,
    /// Process-local only; nothing survives exit.
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub store: StoreKind,

    /// Override for the credentials file location.
    #[serde(default)]
    pub credentials_path: Option<String>,
}
