//! Discovery endpoints.

use dig_auth::Session;
use dig_core::{Discovery, DiscoveryDraft, DiscoveryId};

use crate::{
    DiscoveryClient, DiscoveryQuery,
    error::ClientError,
    http::{bearer, check_response},
};

impl DiscoveryClient {
    /// Fetch the discovery list for a planned query.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP request fails, the backend
    /// returns a non-success status, or the response cannot be parsed.
    pub async fn list_discoveries(
        &self,
        query: &DiscoveryQuery,
    ) -> Result<Vec<Discovery>, ClientError> {
        let url = query.to_url(&self.base_url)?;
        tracing::debug!(%url, "fetching discoveries");
        let resp = check_response(self.http.get(url).send().await?).await?;
        let body = resp.text().await?;
        parse_list(&body)
    }

    /// `POST /api/discovery`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingCredential`] without sending when the
    /// session is anonymous, otherwise any transport or status error.
    pub async fn create_discovery(
        &self,
        session: &Session,
        draft: &DiscoveryDraft,
    ) -> Result<(), ClientError> {
        let token = bearer(session)?;
        let url = self.endpoint("/api/discovery");
        tracing::debug!(%url, title = %draft.title, "creating discovery");
        check_response(
            self.http
                .post(&url)
                .bearer_auth(token)
                .json(draft)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// `PUT /api/discovery/{id}` with the full editable field set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingCredential`] without sending when the
    /// session is anonymous, otherwise any transport or status error.
    pub async fn update_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
        draft: &DiscoveryDraft,
    ) -> Result<(), ClientError> {
        let token = bearer(session)?;
        let url = self.discovery_url(id);
        tracing::debug!(%url, "updating discovery");
        check_response(
            self.http
                .put(&url)
                .bearer_auth(token)
                .json(draft)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// `DELETE /api/discovery/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingCredential`] without sending when the
    /// session is anonymous, otherwise any transport or status error.
    pub async fn delete_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
    ) -> Result<(), ClientError> {
        let token = bearer(session)?;
        let url = self.discovery_url(id);
        tracing::debug!(%url, "deleting discovery");
        check_response(self.http.delete(&url).bearer_auth(token).send().await?).await?;
        Ok(())
    }

    fn discovery_url(&self, id: &DiscoveryId) -> String {
        self.endpoint(&format!(
            "/api/discovery/{}",
            urlencoding::encode(id.as_str())
        ))
    }
}

/// Decode a list body one record at a time. Records that do not fit
/// [`Discovery`] (a blank era or type, say) are skipped so the rest of
/// the list still reaches the map.
fn parse_list(body: &str) -> Result<Vec<Discovery>, ClientError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| ClientError::Parse(format!("discovery list: {e}")))?;

    Ok(raw
        .into_iter()
        .filter_map(|value| {
            let id = value.get("id").cloned();
            match serde_json::from_value::<Discovery>(value) {
                Ok(discovery) => Some(discovery),
                Err(error) => {
                    tracing::warn!(id = ?id, %error, "skipping unreadable discovery");
                    None
                }
            }
        })
        .collect())
}
