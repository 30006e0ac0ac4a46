//! Props extraction settings.

use scoop_parser::{COMPONENT_PLACEHOLDER, DEFAULT_PROPS_FORMAT};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_props_format() -> String {
    DEFAULT_PROPS_FORMAT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Naming pattern for props types, e.g. `{Component}Props`.
    #[serde(default = "default_props_format")]
    pub props_format: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            props_format: default_props_format(),
        }
    }
}

impl ExtractConfig {
    /// # Errors
    /// Returns `ConfigError::InvalidValue` unless `props_format` contains the
    /// component placeholder exactly once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.props_format.matches(COMPONENT_PLACEHOLDER).count();
        if count == 1 {
            return Ok(());
        }
        Err(ConfigError::InvalidValue {
            field: "extract.props_format".to_string(),
            reason: format!(
                "'{}' must contain {COMPONENT_PLACEHOLDER} exactly once (found {count})",
                self.props_format
            ),
        })
    }
}
