//! Marker presentation: per-discovery popup state and the icon it implies.
//!
//! ```text
//! CLOSED ──PopupOpened──▶ OPEN
//!   ▲                       │
//!   └─────PopupClosed───────┘
//! ```
//!
//! A closed marker shows a label callout anchored above the coordinate; an
//! open one collapses to a dot so it does not cover its own popup. At most
//! one popup is open; opening another closes the previous one.

use dig_config::MapConfig;
use dig_core::{Discovery, DiscoveryId, DiscoveryType, Era, GeoPoint};
use serde::Serialize;

const LABEL_ICON_ANCHOR: (i32, i32) = (0, 45);
const LABEL_POPUP_ANCHOR: (i32, i32) = (0, -45);
const DOT_SIZE: (u32, u32) = (16, 16);
const DOT_ICON_ANCHOR: (i32, i32) = (8, 8);
const DOT_POPUP_ANCHOR: (i32, i32) = (0, -8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupState {
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    Opened(DiscoveryId),
    Closed(DiscoveryId),
}

/// Pixel offsets are relative to the icon's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MarkerIcon {
    Label {
        text: String,
        icon_anchor: (i32, i32),
        popup_anchor: (i32, i32),
    },
    Dot {
        size: (u32, u32),
        icon_anchor: (i32, i32),
        popup_anchor: (i32, i32),
    },
}

impl MarkerIcon {
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            icon_anchor: LABEL_ICON_ANCHOR,
            popup_anchor: LABEL_POPUP_ANCHOR,
        }
    }

    #[must_use]
    pub const fn dot() -> Self {
        Self::Dot {
            size: DOT_SIZE,
            icon_anchor: DOT_ICON_ANCHOR,
            popup_anchor: DOT_POPUP_ANCHOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: DiscoveryId,
    pub position: GeoPoint,
    pub state: PopupState,
    pub icon: MarkerIcon,
}

/// Everything a popup shows for one discovery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupDetail {
    pub title: String,
    pub description: String,
    pub era: Era,
    pub region: String,
    pub kind: DiscoveryType,
    pub glyph: &'static str,
    pub source_link: Option<String>,
    pub earth_url: String,
    /// Whether the edit affordance is offered. Display only.
    pub editable: bool,
}

impl PopupDetail {
    #[must_use]
    pub fn new(discovery: &Discovery, editable: bool) -> Self {
        let source_link = Some(discovery.source_link.trim())
            .filter(|link| !link.is_empty())
            .map(str::to_string);
        Self {
            title: discovery.title.clone(),
            description: discovery.description.clone(),
            era: discovery.bible_era,
            region: discovery.region.clone(),
            kind: discovery.kind,
            glyph: discovery.kind.glyph(),
            source_link,
            earth_url: discovery.position().google_earth_url(),
            editable,
        }
    }
}

/// Initial camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Viewport {
    #[must_use]
    pub const fn from_config(config: &MapConfig, compact: bool) -> Self {
        Self {
            center: GeoPoint::new(config.center_lat, config.center_lng),
            zoom: config.zoom_for(compact),
        }
    }
}

/// Popup state for every marker on the map. Unknown ids are `Closed`.
#[derive(Debug, Clone, Default)]
pub struct MarkerPresenter {
    open: Option<DiscoveryId>,
}

impl MarkerPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: PopupEvent) {
        match event {
            PopupEvent::Opened(id) => {
                self.open = Some(id);
            }
            // A late close for a marker that is no longer open changes nothing.
            PopupEvent::Closed(id) => {
                if self.open.as_ref() == Some(&id) {
                    self.open = None;
                }
            }
        }
    }

    #[must_use]
    pub fn state(&self, id: &DiscoveryId) -> PopupState {
        if self.open.as_ref() == Some(id) {
            PopupState::Open
        } else {
            PopupState::Closed
        }
    }

    #[must_use]
    pub fn icon_for(&self, discovery: &Discovery) -> MarkerIcon {
        match self.state(&discovery.id) {
            PopupState::Closed => MarkerIcon::label(discovery.title.clone()),
            PopupState::Open => MarkerIcon::dot(),
        }
    }

    /// Markers for `discoveries`, in list order.
    #[must_use]
    pub fn markers(&self, discoveries: &[Discovery]) -> Vec<Marker> {
        discoveries
            .iter()
            .map(|discovery| Marker {
                id: discovery.id.clone(),
                position: discovery.position(),
                state: self.state(&discovery.id),
                icon: self.icon_for(discovery),
            })
            .collect()
    }

    /// Drop state for ids no longer in the displayed list.
    pub fn retain(&mut self, discoveries: &[Discovery]) {
        if let Some(open) = &self.open
            && !discoveries.iter().any(|d| &d.id == open)
        {
            self.open = None;
        }
    }

    #[must_use]
    pub const fn open_id(&self) -> Option<&DiscoveryId> {
        self.open.as_ref()
    }
}
