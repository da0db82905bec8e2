//! # bilancio-config
//!
//! Layered configuration loading for Bilancio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BILANCIO_*` prefix, `__` as separator)
//! 2. `BILANCIO_API_URL` shorthand for `api.base_url`
//! 3. Project-level `.bilancio/config.toml`
//! 4. User-level `~/.config/bilancio/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BILANCIO_API__BASE_URL` -> `api.base_url`,
//! `BILANCIO_EXPORT__FORMAT` -> `export.format`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use bilancio_config::BilancioConfig;
//!
//! let config = BilancioConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.analyze_url());
//! ```

mod api;
mod error;
mod export;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use error::ConfigError;
pub use export::ExportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shorthand variable for the backend origin.
pub const API_URL_ENV: &str = "BILANCIO_API_URL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BilancioConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl BilancioConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on extraction or validation failure.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".bilancio/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&[API_URL_ENV])
                    .map(|_| "api.base_url".into()),
            )
            .merge(Env::prefixed("BILANCIO_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bilancio").join("config.toml"))
    }
}
