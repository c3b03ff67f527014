//! Initial map viewport.

use serde::{Deserialize, Serialize};

// Jerusalem, Old City.
const fn default_center_lat() -> f64 {
    31.7683
}

const fn default_center_lng() -> f64 {
    35.2137
}

const fn default_zoom() -> u8 {
    13
}

const fn default_compact_zoom() -> u8 {
    12
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Zoom used on narrow viewports.
    #[serde(default = "default_compact_zoom")]
    pub compact_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            compact_zoom: default_compact_zoom(),
        }
    }
}

impl MapConfig {
    pub const fn zoom_for(&self, compact: bool) -> u8 {
        if compact { self.compact_zoom } else { self.zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_center_on_jerusalem() {
        let config = MapConfig::default();
        assert!((config.center_lat - 31.7683).abs() < f64::EPSILON);
        assert!((config.center_lng - 35.2137).abs() < f64::EPSILON);
        assert_eq!(config.zoom_for(false), 13);
        assert_eq!(config.zoom_for(true), 12);
    }
}
