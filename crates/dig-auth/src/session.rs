use chrono::{DateTime, Utc};

use crate::access::Access;
use crate::claims::decode_claims;
use crate::error::AuthError;
use crate::token_store::CredentialStore;

/// The signed-in (or anonymous) state of one client.
///
/// Owns its credential store, so callers decide where the token lives and
/// tests can run against [`crate::MemoryStore`].
pub struct Session {
    store: Box<dyn CredentialStore>,
    token: Option<String>,
    access: Access,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store.name())
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("access", &self.access)
            .finish()
    }
}

impl Session {
    /// Load whatever the store currently holds.
    #[must_use]
    pub fn load(store: Box<dyn CredentialStore>) -> Self {
        let token = store.load();
        let access = Access::from_token(token.as_deref());
        Self {
            store,
            token,
            access,
        }
    }

    /// Persist a freshly issued token and re-derive access from it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the store rejects the write. The session is
    /// left unchanged in that case.
    pub fn login(&mut self, token: &str) -> Result<(), AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MalformedToken("empty token".into()));
        }
        self.store.store(token)?;
        self.access = Access::from_token(Some(token));
        self.token = Some(token.to_string());
        tracing::debug!(store = self.store.name(), role = ?self.access.role(), "session stored");
        Ok(())
    }

    /// Forget the token locally and in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the store cannot delete the credential.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.token = None;
        self.access = Access::anonymous();
        self.store.delete()
    }

    /// Token to attach as `Authorization: Bearer`, if signed in.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn access(&self) -> &Access {
        &self.access
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Best-effort expiry from the unverified `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        decode_claims(self.token.as_deref()?).ok()?.expires_at()
    }

    /// Which store tier supplied the token.
    #[must_use]
    pub fn source(&self) -> Option<&'static str> {
        self.store.source()
    }

    #[must_use]
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}
