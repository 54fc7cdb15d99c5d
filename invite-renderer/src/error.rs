//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while painting or exporting a design.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The intermediate SVG could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// A raster surface could not be allocated.
    #[error("Pixmap allocation failed: {0}")]
    Pixmap(String),

    /// Image encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}
