//! # dig-core
//!
//! Domain types shared by every digmap crate:
//! - Discovery records, drafts, and opaque server-assigned identifiers
//! - Era, discovery type, and role enumerations with user-input parsing
//! - Admin account and login payloads
//! - Client-side filter selection state
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filters;

pub use entities::{
    Admin, Discovery, DiscoveryDraft, DiscoveryId, GeoPoint, LoginRequest, LoginResponse,
    NewAdmin,
};
pub use enums::{DiscoveryType, Era, Role};
pub use errors::CoreError;
pub use filters::FilterState;
