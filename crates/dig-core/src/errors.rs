//! Cross-cutting error types.
//!
//! Transport, configuration, and auth errors live in their own crates and
//! converge into `anyhow` in the `digmap` binary.

use thiserror::Error;

/// Errors raised while validating or parsing domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Data failed validation (empty required field, out-of-range coordinate).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A user-supplied value does not name a known variant.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },
}
