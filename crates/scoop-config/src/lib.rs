//! # scoop-config
//!
//! Layered configuration loading for storyscoop using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STORYSCOOP_*` prefix, `__` as separator)
//! 2. Project-level `.storyscoop.toml`
//! 3. User-level `~/.config/storyscoop/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! `STORYSCOOP_STORY__WRAP` -> `story.wrap`,
//! `STORYSCOOP_EXTRACT__PROPS_FORMAT` -> `extract.props_format`.
//!
//! # Usage
//!
//! ```no_run
//! use scoop_config::ScoopConfig;
//!
//! let config = ScoopConfig::load().expect("config");
//! println!("wrapping stories in {}", config.story.wrap);
//! ```

mod error;
mod extract;
mod story;

pub use error::ConfigError;
pub use extract::ExtractConfig;
pub use story::StoryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".storyscoop.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STORYSCOOP_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoopConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub story: StoryConfig,
}

impl ScoopConfig {
    /// Load and validate configuration from all sources.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` for unreadable or mistyped sources and
    /// `ConfigError::InvalidValue` when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// # Errors
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extract.validate()
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("storyscoop").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScoopConfig::default();
        assert_eq!(config.extract.props_format, "{Component}Props");
        assert_eq!(config.story.wrap, "div");
        assert!(!config.story.overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn global_path_ends_with_storyscoop_config() {
        if let Some(path) = ScoopConfig::global_config_path() {
            assert!(path.ends_with("storyscoop/config.toml"));
        }
    }
}
