use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::enums::{DiscoveryType, Era};
use crate::errors::CoreError;

/// Opaque, server-assigned discovery identifier.
///
/// The backend has served both numeric and string ids; either form
/// deserializes, and the id is always written back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct DiscoveryId(String);

impl DiscoveryId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiscoveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DiscoveryId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for DiscoveryId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for DiscoveryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(text) => Self(text),
            Wire::Unsigned(n) => Self(n.to_string()),
            Wire::Signed(n) => Self(n.to_string()),
        })
    }
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Link to a 3D view of the location, camera 5000 m above ground.
    #[must_use]
    pub fn google_earth_url(&self) -> String {
        format!(
            "https://earth.google.com/web/@{},{},5000a",
            self.latitude, self.longitude
        )
    }
}

/// A single archaeological finding as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discovery {
    pub id: DiscoveryId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bible_era: Era,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "type")]
    pub kind: DiscoveryType,
    #[serde(default)]
    pub source_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Discovery {
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// The editable subset of this record.
    #[must_use]
    pub fn draft(&self) -> DiscoveryDraft {
        DiscoveryDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            bible_era: self.bible_era,
            region: self.region.clone(),
            kind: self.kind,
            source_link: self.source_link.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Overwrite every editable field with `draft`, keeping id and image.
    pub fn apply(&mut self, draft: DiscoveryDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.bible_era = draft.bible_era;
        self.region = draft.region;
        self.kind = draft.kind;
        self.source_link = draft.source_link;
        self.latitude = draft.latitude;
        self.longitude = draft.longitude;
    }
}

/// Full replacement of a discovery's editable fields.
///
/// Body of both `POST /api/discovery` and `PUT /api/discovery/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDraft {
    pub title: String,
    pub description: String,
    pub bible_era: Era,
    pub region: String,
    #[serde(rename = "type")]
    pub kind: DiscoveryType,
    pub source_link: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DiscoveryDraft {
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Check the draft before submitting a new record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if title or description is blank or
    /// the coordinate is outside WGS84 bounds.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "description must not be empty".into(),
            ));
        }
        if !self.position().is_valid() {
            return Err(CoreError::Validation(format!(
                "coordinate ({}, {}) is out of range",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }
}
