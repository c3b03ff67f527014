//! Entity structs for the discovery map domain.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`; JSON keys
//! are camelCase to match the backend.

mod admin;
mod discovery;

pub use admin::{Admin, LoginRequest, LoginResponse, NewAdmin};
pub use discovery::{Discovery, DiscoveryDraft, DiscoveryId, GeoPoint};
