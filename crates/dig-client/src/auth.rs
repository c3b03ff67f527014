//! Login endpoint.

use dig_auth::Session;
use dig_core::{LoginRequest, LoginResponse};

use crate::{DiscoveryClient, error::ClientError, http::check_response};

impl DiscoveryClient {
    /// `POST /api/login`, returning the issued bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for rejected credentials and
    /// [`ClientError::Parse`] when the response carries no token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let url = self.endpoint("/api/login");
        tracing::debug!(%url, username, "logging in");
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = check_response(self.http.post(&url).json(&request).send().await?).await?;
        let body = resp.text().await?;
        token_from_body(&body)
    }

    /// Log in and persist the token into `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if login fails or the session store rejects
    /// the token.
    pub async fn sign_in(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let token = self.login(username, password).await?;
        session.login(&token)?;
        Ok(())
    }
}

fn token_from_body(body: &str) -> Result<String, ClientError> {
    let parsed: LoginResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Parse(format!("login response: {e}")))?;
    parsed
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ClientError::Parse("login response carried no token".into()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn token_is_extracted() {
        assert_eq!(token_from_body(r#"{"token":"a.b.c"}"#).unwrap(), "a.b.c");
    }

    #[test]
    fn missing_or_blank_token_is_a_parse_error() {
        for body in [r"{}", r#"{"token":null}"#, r#"{"token":""}"#] {
            let err = token_from_body(body).unwrap_err();
            assert!(matches!(err, ClientError::Parse(_)), "{body}");
        }
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        assert!(matches!(
            token_from_body("<html>"),
            Err(ClientError::Parse(_))
        ));
    }
}
