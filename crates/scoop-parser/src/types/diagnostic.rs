use serde::{Deserialize, Serialize};

/// How loudly a diagnostic should be surfaced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// A non-fatal finding collected during extraction.
///
/// Extraction never prints; callers decide how to report these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(component: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            component: Some(component.to_string()),
            message: message.into(),
        }
    }

    pub fn info(component: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            component: Some(component.to_string()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        };
        write!(f, "{label}: {}", self.message)
    }
}
