use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment value did not fit the config shape.
    #[error("invalid digmap configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("[{section}] is not configured (set {hint})")]
    NotConfigured { section: String, hint: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
