use dig_core::Role;

use crate::claims::{RoleClaims, decode_claims};

/// What the interface should offer for the current credential.
///
/// Purely cosmetic: hiding an edit control never stops a request, and the
/// backend re-checks every mutating call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Access {
    role: Option<Role>,
    subject: Option<String>,
}

impl Access {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Derive access from a stored token.
    ///
    /// An absent token is the normal anonymous case and logs only at `debug`.
    /// An undecodable one logs at `error`. Both yield anonymous access.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token else {
            tracing::debug!("no credential stored; edit controls hidden");
            return Self::anonymous();
        };
        match decode_claims(token) {
            Ok(claims) => Self::from_claims(&claims),
            Err(error) => {
                tracing::error!(%error, "failed to decode credential");
                Self::anonymous()
            }
        }
    }

    #[must_use]
    pub fn from_claims(claims: &RoleClaims) -> Self {
        Self {
            role: claims.role.as_deref().and_then(Role::from_claim),
            subject: claims.sub.clone(),
        }
    }

    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Edit and delete controls on discoveries.
    #[must_use]
    pub const fn can_edit_discoveries(&self) -> bool {
        matches!(self.role, Some(Role::Admin | Role::SuperAdmin))
    }

    /// Admin listing, creation and deletion.
    #[must_use]
    pub const fn can_manage_admins(&self) -> bool {
        matches!(self.role, Some(Role::SuperAdmin))
    }
}
