//! # dig-auth
//!
//! Credential handling for digmap.
//!
//! Stores the bearer token issued by `POST /api/login` (keychain via
//! `keyring`, environment, or a `0600` file), decodes its unverified claims,
//! and turns the `role` claim into display-level [`Access`]. The backend is
//! the only authorization boundary; nothing here verifies a signature.

pub mod access;
pub mod claims;
pub mod error;
pub mod session;
pub mod token_store;

pub use access::Access;
pub use claims::{RoleClaims, decode_claims};
pub use error::AuthError;
pub use session::Session;
pub use token_store::{
    CredentialStore, EnvStore, FileStore, KeyringStore, MemoryStore, TieredStore,
};

use dig_config::{AuthConfig, StoreKind};

/// Build the credential store selected by configuration.
///
/// # Errors
///
/// Returns [`AuthError::TokenStoreError`] if a file-backed store is selected
/// and no credentials path can be resolved.
pub fn store_for(config: &AuthConfig) -> Result<Box<dyn CredentialStore>, AuthError> {
    let file = || match &config.credentials_path {
        Some(path) => Ok(FileStore::at(path)),
        None => FileStore::in_home(),
    };
    Ok(match config.store {
        StoreKind::Tiered => Box::new(TieredStore::new(
            KeyringStore::default(),
            EnvStore::default(),
            file()?,
        )),
        StoreKind::File => Box::new(file()?),
        StoreKind::Keyring => Box::new(KeyringStore::default()),
        StoreKind::Memory => Box::new(MemoryStore::with_token(
            EnvStore::default().load().unwrap_or_default(),
        )),
    })
}

/// Open a session on the configured store.
///
/// # Errors
///
/// Returns [`AuthError`] if the store cannot be constructed.
pub fn open_session(config: &AuthConfig) -> Result<Session, AuthError> {
    store_for(config).map(Session::load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_honours_configured_path() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("token");
        std::fs::write(&path, "a.b.c").expect("write");

        let config = AuthConfig {
            store: StoreKind::File,
            credentials_path: Some(path.display().to_string()),
        };
        let store = store_for(&config).unwrap();
        assert_eq!(store.name(), "file");
        assert_eq!(store.load().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn memory_store_starts_empty_without_env() {
        let config = AuthConfig {
            store: StoreKind::Memory,
            credentials_path: None,
        };
        let session = open_session(&config).unwrap();
        assert_eq!(session.store_name(), "memory");
        if std::env::var(token_store::TOKEN_ENV_VAR).is_err() {
            assert!(!session.is_authenticated());
        }
    }
}
