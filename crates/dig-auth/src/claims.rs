use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims read from the payload segment of a bearer credential.
///
/// Decoding is read-only and never verifies the signature. Anything derived
/// from these claims is display context; the backend remains the only
/// authorization boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoleClaims {
    /// Subject (usually the username).
    #[serde(default)]
    pub sub: Option<String>,
    /// Privilege tier, e.g. `"ADMIN"` or `"SUPER-ADMIN"`.
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl RoleClaims {
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// `true` only when an `exp` claim exists and lies in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| at <= Utc::now())
    }
}

/// Decode the claims payload without signature verification.
///
/// # Errors
///
/// Returns [`AuthError::MalformedToken`] if the token is not three segments,
/// the payload is not base64url, or it is not a JSON object.
pub fn decode_claims(token: &str) -> Result<RoleClaims, AuthError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))
}

#[cfg(test)]
pub(crate) fn make_token(payload: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = engine.encode(payload);
    let signature = engine.encode("fake_sig");
    format!("{header}.{payload}.{signature}")
}
