//! Client-side categorical filter selection.
//!
//! Three independent optional selections. Selectors present an "All" entry
//! (empty value or the literal `All`); choosing it clears the selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DiscoveryType, Era};
use crate::errors::CoreError;

/// Regions offered by the map's region selector. Region stays free text.
pub const KNOWN_REGIONS: [&str; 5] = ["Israel", "Egypt", "Sudan", "Babylon", "Jerusalem"];

/// Returns `None` for the "All" sentinel (empty, whitespace, or `All`).
fn selection(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterState {
    pub bible_era: Option<Era>,
    pub region: Option<String>,
    pub kind: Option<DiscoveryType>,
}

impl FilterState {
    /// Set the era selection from selector text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] if the text is neither the "All"
    /// sentinel nor a known era. The current selection is left unchanged.
    pub fn select_era(&mut self, raw: &str) -> Result<(), CoreError> {
        self.bible_era = selection(raw).map(str::parse::<Era>).transpose()?;
        Ok(())
    }

    pub fn select_region(&mut self, raw: &str) {
        self.region = selection(raw).map(str::to_string);
    }

    /// Set the type selection from selector text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] if the text is neither the "All"
    /// sentinel nor a known discovery type.
    pub fn select_kind(&mut self, raw: &str) -> Result<(), CoreError> {
        self.kind = selection(raw).map(str::parse::<DiscoveryType>).transpose()?;
        Ok(())
    }

    /// Whether any selection is set.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.bible_era.is_some() || self.region.is_some() || self.kind.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
