//! # hlm-config
//!
//! Layered configuration loading for HLM ERP using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HLM_*` prefix, `__` as separator)
//! 2. Project-level `.hlm/config.toml`
//! 3. User-level `~/.config/hlm/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `HLM_DATABASE__PATH` -> `database.path`,
//! `HLM_AUTH__PBKDF2_ITERATIONS` -> `auth.pbkdf2_iterations`, etc.
//!
//! ```no_run
//! use hlm_config::HlmConfig;
//!
//! let config = HlmConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod auth;
mod database;
mod error;
mod general;

pub use auth::{AuthConfig, MAX_SESSION_TTL_HOURS};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HlmConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HlmConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed, or a
    /// validation error from [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".hlm/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("HLM_").split("__"))
    }

    /// Reject values that would make the service unusable.
    ///
    /// # Errors
    ///
    /// `NotConfigured` for an empty database path, `InvalidValue` for
    /// non-positive iteration counts, TTLs or limits, and for a session TTL
    /// above [`MAX_SESSION_TTL_HOURS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.database.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        if self.auth.pbkdf2_iterations == 0 {
            return Err(invalid("auth.pbkdf2_iterations", "must be at least 1"));
        }
        if self.auth.session_ttl_hours <= 0 {
            return Err(invalid("auth.session_ttl_hours", "must be positive"));
        }
        if self.auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(invalid(
                "auth.session_ttl_hours",
                &format!("must be at most {MAX_SESSION_TTL_HOURS}"),
            ));
        }
        if self.general.default_limit == 0 {
            return Err(invalid("general.default_limit", "must be at least 1"));
        }
        if self.general.audit_limit == 0 {
            return Err(invalid("general.audit_limit", "must be at least 1"));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hlm").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}
