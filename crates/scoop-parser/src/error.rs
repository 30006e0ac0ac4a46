//! Parser error types for scoop-parser.

use std::path::PathBuf;

/// Errors that stop extraction of an input file.
///
/// Everything below the file level degrades instead of failing: unresolvable
/// references, malformed const objects and missing imported modules never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid props format '{format}': {reason}")]
    InvalidPropsFormat { format: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
