//! # dig-view
//!
//! Presentation state for the discoveries map, independent of any renderer.
//!
//! - [`marker`]: popup state per discovery and the icon it implies
//! - [`edit_panel`]: detail/edit form with a two-step delete and a visible failure state
//! - [`debounce`]: quiescence window for search keystrokes
//! - [`map_view`]: filters, search, displayed list, and request generations
//! - [`controller`]: async loop driving the above against a [`dig_client::DiscoveryApi`]

pub mod controller;
pub mod debounce;
pub mod edit_panel;
pub mod map_view;
pub mod marker;

pub use controller::{MapController, MapEvent};
pub use debounce::Debouncer;
pub use edit_panel::{EditForm, EditPanel, Field, Operation, PanelError, PanelState};
pub use map_view::{FetchTicket, MapView, Settled};
pub use marker::{
    Marker, MarkerIcon, MarkerPresenter, PopupDetail, PopupEvent, PopupState, Viewport,
};
