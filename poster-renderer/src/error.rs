//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur when handing a paint list to a surface.
///
/// Building the paint list itself never fails; components without a renderer
/// are skipped.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Surface has zero area.
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Drawing surface rejected the frame.
    #[error("Frame render failed: {0}")]
    Frame(String),

    /// Paint list could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
