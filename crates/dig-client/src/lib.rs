//! # dig-client
//!
//! REST client for the discoveries backend.
//!
//! Covers every endpoint the map consumes:
//! - discovery reads (`/api/discoveries`, `/filters`, `/search`), planned by [`DiscoveryQuery`]
//! - discovery create/update/delete (`/api/discovery`)
//! - login (`/api/login`)
//! - admin management (`/api/admins`)
//!
//! Mutating and admin calls take a [`Session`] and fail with
//! [`ClientError::MissingCredential`] before sending anything when it holds
//! no token.

pub mod admins;
pub mod auth;
pub mod discoveries;
pub mod query;

mod error;
mod http;

pub use error::ClientError;
pub use query::{DiscoveryQuery, FilterParams, Trigger};

use std::future::Future;
use std::time::Duration;

use dig_auth::Session;
use dig_config::ApiConfig;
use dig_core::{Discovery, DiscoveryDraft, DiscoveryId};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ── Seam ───────────────────────────────────────────────────────────

/// The calls the interactive map depends on.
///
/// [`DiscoveryClient`] is the production implementation; tests script
/// their own to control completion order.
pub trait DiscoveryApi: Send + Sync + 'static {
    fn list_discoveries(
        &self,
        query: &DiscoveryQuery,
    ) -> impl Future<Output = Result<Vec<Discovery>, ClientError>> + Send;

    fn update_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
        draft: &DiscoveryDraft,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn delete_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to one backend origin.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscoveryClient {
    /// Create a client for `base_url` with the default 10 s timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("digmap/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Build from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if no backend origin is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let url = config.require_url()?;
        Ok(Self::with_timeout(
            url,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

// Inherent methods of the same name take precedence, so these delegate.
impl DiscoveryApi for DiscoveryClient {
    fn list_discoveries(
        &self,
        query: &DiscoveryQuery,
    ) -> impl Future<Output = Result<Vec<Discovery>, ClientError>> + Send {
        Self::list_discoveries(self, query)
    }

    fn update_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
        draft: &DiscoveryDraft,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::update_discovery(self, session, id, draft)
    }

    fn delete_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::delete_discovery(self, session, id)
    }
}
