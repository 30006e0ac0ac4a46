//! Renderer error types for scoop-render.

/// Errors raised while preparing a story for rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid wrap spec '{spec}': {reason}")]
    InvalidWrapSpec { spec: String, reason: String },
}
