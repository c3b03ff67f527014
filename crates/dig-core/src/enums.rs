//! Enumerations for discovery metadata and account roles.
//!
//! Wire spellings follow the backend: eras are title-cased phrases
//! (`"Old Testament"`), types are `PascalCase`, roles are upper-case with a
//! hyphen (`"SUPER-ADMIN"`). User input is parsed leniently via [`FromStr`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Normalize user input for case- and separator-insensitive matching.
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Era
// ---------------------------------------------------------------------------

/// Biblical testament period a discovery is associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Era {
    #[serde(rename = "Old Testament")]
    OldTestament,
    #[serde(rename = "New Testament")]
    NewTestament,
}

impl Era {
    pub const ALL: [Self; 2] = [Self::OldTestament, Self::NewTestament];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OldTestament => "Old Testament",
            Self::NewTestament => "New Testament",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Era {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "oldtestament" | "ot" => Ok(Self::OldTestament),
            "newtestament" | "nt" => Ok(Self::NewTestament),
            _ => Err(CoreError::UnknownVariant {
                kind: "era",
                value: raw.to_string(),
                expected: "Old Testament, New Testament".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DiscoveryType
// ---------------------------------------------------------------------------

/// Physical category of a discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DiscoveryType {
    Scroll,
    Inscription,
    Ruin,
    Artifact,
    Altar,
    Church,
}

impl DiscoveryType {
    pub const ALL: [Self; 6] = [
        Self::Scroll,
        Self::Inscription,
        Self::Ruin,
        Self::Artifact,
        Self::Altar,
        Self::Church,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "Scroll",
            Self::Inscription => "Inscription",
            Self::Ruin => "Ruin",
            Self::Artifact => "Artifact",
            Self::Altar => "Altar",
            Self::Church => "Church",
        }
    }

    /// Glyph name shown next to the type in a popup.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Scroll => "scroll-unfurled",
            Self::Inscription => "rune-stone",
            Self::Ruin => "ancient-ruins",
            Self::Artifact => "glowing-artifact",
            Self::Altar => "star-altar",
            Self::Church => "church",
        }
    }
}

impl fmt::Display for DiscoveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryType {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "type",
                value: raw.to_string(),
                expected: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Privilege tier carried in the credential's `role` claim.
///
/// ```text
/// ADMIN        → discovery create/edit/delete affordances
/// SUPER-ADMIN  → everything ADMIN has + admin account management
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPER-ADMIN")]
    SuperAdmin,
}

impl Role {
    /// Map a raw claim value to a role. Matching is exact: anything other than
    /// `"ADMIN"` or `"SUPER-ADMIN"` carries no elevated privileges.
    #[must_use]
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "ADMIN" => Some(Self::Admin),
            "SUPER-ADMIN" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER-ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(CoreError::UnknownVariant {
                kind: "role",
                value: raw.to_string(),
                expected: "ADMIN, SUPER-ADMIN".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Old Testament", Era::OldTestament)]
    #[case("old-testament", Era::OldTestament)]
    #[case("OLD_TESTAMENT", Era::OldTestament)]
    #[case(" ot ", Era::OldTestament)]
    #[case("New Testament", Era::NewTestament)]
    #[case("nt", Era::NewTestament)]
    fn era_parses_lenient_input(#[case] raw: &str, #[case] expected: Era) {
        assert_eq!(raw.parse::<Era>().unwrap(), expected);
    }

    #[test]
    fn era_rejects_unknown() {
        let err = "Bronze Age".parse::<Era>().unwrap_err();
        assert!(err.to_string().contains("unknown era 'Bronze Age'"));
    }

    #[test]
    fn era_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Era::OldTestament).unwrap(),
            "\"Old Testament\""
        );
        let era: Era = serde_json::from_str("\"New Testament\"").unwrap();
        assert_eq!(era, Era::NewTestament);
    }

    #[rstest]
    #[case("scroll", DiscoveryType::Scroll)]
    #[case("INSCRIPTION", DiscoveryType::Inscription)]
    #[case("Church", DiscoveryType::Church)]
    fn discovery_type_parses_case_insensitively(
        #[case] raw: &str,
        #[case] expected: DiscoveryType,
    ) {
        assert_eq!(raw.parse::<DiscoveryType>().unwrap(), expected);
    }

    #[test]
    fn discovery_type_error_lists_choices() {
        let err = "Temple".parse::<DiscoveryType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Scroll, Inscription, Ruin, Artifact, Altar, Church"));
    }

    #[test]
    fn every_type_has_a_glyph() {
        for kind in DiscoveryType::ALL {
            assert!(!kind.glyph().is_empty());
        }
    }

    #[test]
    fn role_from_claim_is_exact() {
        assert_eq!(Role::from_claim("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim("SUPER-ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::from_claim("admin"), None);
        assert_eq!(Role::from_claim("USER"), None);
        assert_eq!(Role::from_claim(""), None);
    }

    #[test]
    fn role_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"SUPER-ADMIN\""
        );
    }

    #[test]
    fn role_parses_user_input() {
        assert_eq!("super-admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }
}
