use std::sync::Arc;

use anyhow::Context;
use dig_auth::Session;
use dig_client::{DiscoveryClient, Trigger};
use dig_config::DigConfig;
use dig_view::{MapController, MapEvent, Settled};

/// Everything a command handler needs: resolved config and the credential
/// session. The HTTP client is built on demand so commands that never talk
/// to the backend work without an API URL.
pub struct AppContext {
    pub config: DigConfig,
    pub session: Session,
}

impl AppContext {
    pub fn init(config: DigConfig) -> anyhow::Result<Self> {
        let session =
            dig_auth::open_session(&config.auth).context("failed to open credential store")?;
        tracing::debug!(
            store = session.store_name(),
            authenticated = session.is_authenticated(),
            "session loaded"
        );
        Ok(Self { config, session })
    }

    pub fn client(&self) -> anyhow::Result<DiscoveryClient> {
        DiscoveryClient::from_config(&self.config.api)
            .context("backend URL not configured (set DIGMAP_API__URL or pass --api-url)")
    }

    /// A map controller with the unfiltered list already loaded.
    pub async fn into_map(self) -> anyhow::Result<MapController<DiscoveryClient>> {
        let client = self.client()?;
        let mut controller = MapController::new(
            Arc::new(client),
            self.session,
            self.config.search.debounce(),
        );
        controller.refresh(Trigger::Filters);
        for event in controller.run_until_idle().await {
            if let MapEvent::Settled(Settled::Failed(message)) = event {
                anyhow::bail!("failed to load discoveries: {message}");
            }
        }
        Ok(controller)
    }
}
