//! Credential persistence behind the [`CredentialStore`] seam.
//!
//! The tiered store mirrors how the CLI resolves a token at startup:
//! OS keychain first, then the `DIGMAP_AUTH__TOKEN` variable, then the
//! `~/.digmap/credentials` file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "digmap";
const KEYRING_ENTRY: &str = "token";
const CREDENTIALS_DIR: &str = ".digmap";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Environment variable consulted by [`EnvStore`].
pub const TOKEN_ENV_VAR: &str = "DIGMAP_AUTH__TOKEN";

/// Somewhere a single bearer token can be kept between runs.
pub trait CredentialStore: Send + Sync {
    /// Short label shown by `digmap auth status`.
    fn name(&self) -> &'static str;

    /// The stored token, if any. Empty or whitespace-only values count as absent.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the backing medium rejects the write.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    /// Remove the stored token. Removing a missing token succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the backing medium rejects the removal.
    fn delete(&self) -> Result<(), AuthError>;

    /// Which tier the current token came from.
    fn source(&self) -> Option<&'static str> {
        self.load().map(|_| self.name())
    }
}

fn non_empty(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// --- Memory ---

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .and_then(non_empty)
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// --- File ---

/// Plain-text credentials file, created `0600` inside a `0700` directory on unix.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at `~/.digmap/credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] if the home directory cannot be resolved.
    pub fn in_home() -> Result<Self, AuthError> {
        Self::default_path().map(Self::at)
    }

    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] if the home directory cannot be resolved.
    pub fn default_path() -> Result<PathBuf, AuthError> {
        dirs::home_dir()
            .map(|h| h.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE_NAME))
            .ok_or_else(|| {
                AuthError::TokenStoreError(
                    "home directory not found; cannot store credentials".into(),
                )
            })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok().and_then(non_empty)
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&self.path, token).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn delete(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::TokenStoreError(format!(
                    "failed to delete {}: {e}",
                    self.path.display()
                ))
            })?;
        }
        Ok(())
    }
}

// --- Keyring ---

/// OS keychain entry `token` under service `digmap`.
///
/// The service name can be overridden with `DIGMAP_KEYRING_SERVICE` so test
/// runs never touch real credentials.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self {
            service: std::env::var("DIGMAP_KEYRING_SERVICE")
                .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string()),
        }
    }
}

impl KeyringStore {
    #[must_use]
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, AuthError> {
        keyring::Entry::new(&self.service, KEYRING_ENTRY)
            .map_err(|e| AuthError::KeyringError(e.to_string()))
    }
}

impl CredentialStore for KeyringStore {
    fn name(&self) -> &'static str {
        "keyring"
    }

    fn load(&self) -> Option<String> {
        self.entry().ok()?.get_password().ok().and_then(non_empty)
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        self.entry()?
            .set_password(token)
            .map_err(|e| AuthError::KeyringError(e.to_string()))
    }

    fn delete(&self) -> Result<(), AuthError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::KeyringError(e.to_string())),
        }
    }
}

// --- Environment ---

/// Read-only token from an environment variable, for CI and scripts.
#[derive(Debug, Clone)]
pub struct EnvStore {
    var: String,
}

impl Default for EnvStore {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl EnvStore {
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialStore for EnvStore {
    fn name(&self) -> &'static str {
        "env"
    }

    fn load(&self) -> Option<String> {
        std::env::var(&self.var).ok().and_then(non_empty)
    }

    fn store(&self, _token: &str) -> Result<(), AuthError> {
        Err(AuthError::TokenStoreError(format!(
            "{} is read-only; unset it or choose another store",
            self.var
        )))
    }

    fn delete(&self) -> Result<(), AuthError> {
        if self.load().is_some() {
            tracing::warn!(var = %self.var, "token still provided by environment after logout");
        }
        Ok(())
    }
}

// --- Tiered ---

/// Keyring, then environment, then file.
///
/// Writes go to the keyring and fall back to the file when the keyring is
/// unavailable. Deletes clear both writable tiers.
#[derive(Debug)]
pub struct TieredStore {
    keyring: KeyringStore,
    env: EnvStore,
    file: FileStore,
}

impl TieredStore {
    #[must_use]
    pub const fn new(keyring: KeyringStore, env: EnvStore, file: FileStore) -> Self {
        Self { keyring, env, file }
    }

    fn tiers(&self) -> [&dyn CredentialStore; 3] {
        [&self.keyring, &self.env, &self.file]
    }
}

impl CredentialStore for TieredStore {
    fn name(&self) -> &'static str {
        "tiered"
    }

    fn load(&self) -> Option<String> {
        self.tiers().into_iter().find_map(|tier| tier.load())
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        match self.keyring.store(token) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.file.store(token)
            }
        }
    }

    fn delete(&self) -> Result<(), AuthError> {
        if let Err(error) = self.keyring.delete() {
            tracing::debug!(%error, "keyring delete skipped");
        }
        self.env.delete()?;
        self.file.delete()
    }

    fn source(&self) -> Option<&'static str> {
        self.tiers().into_iter().find_map(|tier| tier.source())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_path_is_under_home() {
        let path = FileStore::default_path().expect("should resolve");
        assert!(path.ends_with(".digmap/credentials"));
    }

    #[test]
    fn memory_store_cycle() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), None);
        store.store("a.b.c").unwrap();
        assert_eq!(store.load().as_deref(), Some("a.b.c"));
        assert_eq!(store.source(), Some("memory"));
        store.delete().unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(store.source(), None);
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::at(tmp.path().join("nested").join("credentials"));

        store.store("test_jwt_abc123").unwrap();
        assert_eq!(store.load().as_deref(), Some("test_jwt_abc123"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.path())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        store.delete().unwrap();
        assert!(!store.path().exists());
        store.delete().unwrap();
    }

    #[test]
    fn file_store_ignores_empty_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        std::fs::write(&path, "   \n  ").expect("write");
        assert!(FileStore::at(path).load().is_none());
    }

    #[test]
    fn file_store_trims_trailing_newline() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        std::fs::write(&path, "a.b.c\n").expect("write");
        assert_eq!(FileStore::at(path).load().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn env_store_is_read_only() {
        let store = EnvStore::new("DIGMAP_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert!(store.load().is_none());
        assert!(store.store("x.y.z").is_err());
        store.delete().unwrap();
    }
}
