//! Props type naming pattern (`{Component}Props` by default).

use regex::Regex;

use crate::error::ParserError;

pub const COMPONENT_PLACEHOLDER: &str = "{Component}";
pub const DEFAULT_PROPS_FORMAT: &str = "{Component}Props";

/// Capture for the component name inside a props type name.
const COMPONENT_CAPTURE: &str = "([A-Z][a-zA-Z0-9_]+)";

/// Derives component names from props type names.
#[derive(Debug, Clone)]
pub struct PropsPattern {
    format: String,
    regex: Regex,
}

impl PropsPattern {
    /// Compile a format string holding exactly one `{Component}` placeholder.
    /// Everything around the placeholder matches literally.
    ///
    /// # Errors
    /// Returns `ParserError::InvalidPropsFormat` when the placeholder is
    /// missing or repeated.
    pub fn new(format: &str) -> Result<Self, ParserError> {
        let invalid = |reason: &str| ParserError::InvalidPropsFormat {
            format: format.to_string(),
            reason: reason.to_string(),
        };
        let Some((prefix, suffix)) = format.split_once(COMPONENT_PLACEHOLDER) else {
            return Err(invalid("missing {Component} placeholder"));
        };
        if suffix.contains(COMPONENT_PLACEHOLDER) {
            return Err(invalid("{Component} must appear exactly once"));
        }
        let pattern = format!(
            "^{}{COMPONENT_CAPTURE}{}$",
            regex::escape(prefix),
            regex::escape(suffix)
        );
        let regex = Regex::new(&pattern).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            format: format.to_string(),
            regex,
        })
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Component name captured from a props type name, if it matches.
    #[must_use]
    pub fn component_name<'a>(&self, props_name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(props_name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Props type name for a component.
    #[must_use]
    pub fn props_name(&self, component: &str) -> String {
        self.format.replacen(COMPONENT_PLACEHOLDER, component, 1)
    }
}
