//! # dig-config
//!
//! Layered configuration loading for digmap using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DIGMAP_*` prefix, `__` as separator)
//! 2. Plain origin variables `NEXT_PUBLIC_API_URL` / `API_URL` (mapped to `api.url`)
//! 3. Project-level `.digmap/config.toml`
//! 4. User-level `~/.config/digmap/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DIGMAP_API__URL` -> `api.url`, `DIGMAP_SEARCH__DEBOUNCE_MS` ->
//! `search.debounce_ms`, etc. The `__` (double underscore) separates nested
//! config sections.
//!
//! # Usage
//!
//! ```no_run
//! use dig_config::DigConfig;
//!
//! let config = DigConfig::load().expect("config");
//! if config.api.is_configured() {
//!     println!("backend: {}", config.api.url);
//! }
//! ```

mod api;
mod auth;
mod error;
mod map;
mod search;

pub use api::ApiConfig;
pub use auth::{AuthConfig, StoreKind};
pub use error::ConfigError;
pub use map::MapConfig;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Plain variables that carry only the backend origin.
const ORIGIN_ENV_VARS: [&str; 2] = ["NEXT_PUBLIC_API_URL", "API_URL"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DigConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl DigConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env` files; callers load those into the process
    /// environment first.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// Public so tests and the CLI can layer additional providers on top.
    pub fn figment() -> Figment {
        Self::figment_for(Self::global_config_path(), Path::new(".digmap/config.toml"))
    }

    /// Build the provider chain from explicit file locations.
    pub fn figment_for(global_path: Option<PathBuf>, local_path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Bare origin variables
        figment = figment.merge(
            Env::raw()
                .only(&ORIGIN_ENV_VARS)
                .map(|_| "api.url".into()),
        );

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("DIGMAP_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("digmap").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = DigConfig::default();
        assert!(!config.api.is_configured());
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.map.zoom, 13);
        assert_eq!(config.auth.store, StoreKind::Tiered);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: DigConfig = DigConfig::figment().extract()?;
            assert_eq!(config.api.timeout_secs, 10);
            assert_eq!(config.search.debounce().as_millis(), 300);
            Ok(())
        });
    }

    #[test]
    fn load_leaves_dotenv_files_to_the_caller() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".env", "DIGMAP_API__URL=http://from-dotenv\n")?;
            jail.create_dir(".digmap")?;
            jail.create_file(".digmap/config.toml", "[search]\ndebounce_ms = 150\n")?;

            let config = DigConfig::load().map_err(|e| e.to_string())?;
            assert_ne!(config.api.url, "http://from-dotenv");
            assert_eq!(config.search.debounce_ms, 150);
            Ok(())
        });
    }
}
