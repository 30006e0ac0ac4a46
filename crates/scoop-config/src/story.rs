//! Story generation settings.

use serde::{Deserialize, Serialize};

fn default_wrap() -> String {
    "div".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryConfig {
    /// Wrap spec for the markup around each component.
    #[serde(default = "default_wrap")]
    pub wrap: String,

    /// Replace story files that already exist.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            wrap: default_wrap(),
            overwrite: false,
        }
    }
}
