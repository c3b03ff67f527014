//! Admin management endpoints. The backend only serves these to SUPER-ADMIN.

use dig_auth::Session;
use dig_core::{Admin, NewAdmin};

use crate::{
    DiscoveryClient,
    error::ClientError,
    http::{bearer, check_response},
};

impl DiscoveryClient {
    /// `GET /api/admins`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingCredential`] without sending when the
    /// session is anonymous, otherwise any transport, status, or parse error.
    pub async fn list_admins(&self, session: &Session) -> Result<Vec<Admin>, ClientError> {
        let token = bearer(session)?;
        let url = self.endpoint("/api/admins");
        tracing::debug!(%url, "listing admins");
        let resp = check_response(self.http.get(&url).bearer_auth(token).send().await?).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("admin list: {e}")))
    }

    /// `POST /api/admins`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingCredential`] without sending when the
    /// session is anonymous, otherwise any transport or status error.
    pub async fn create_admin(
        &self,
        session: &Session,
        admin: &NewAdmin,
    ) -> Result<(), ClientError> {
        let token = bearer(session)?;
        let url = self.endpoint("/api/admins");
        tracing::debug!(%url, username = %admin.username, "creating admin");
        check_response(
            self.http
                .post(&url)
                .bearer_auth(token)
                .json(admin)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// `DELETE /api/admins/{username}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingCredential`] without sending when the
    /// session is anonymous, otherwise any transport or status error.
    pub async fn delete_admin(&self, session: &Session, username: &str) -> Result<(), ClientError> {
        let token = bearer(session)?;
        let url = self.endpoint(&format!(
            "/api/admins/{}",
            urlencoding::encode(username)
        ));
        tracing::debug!(%url, "deleting admin");
        check_response(self.http.delete(&url).bearer_auth(token).send().await?).await?;
        Ok(())
    }
}
