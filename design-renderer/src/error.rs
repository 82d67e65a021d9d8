//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while exporting a surface.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The SVG intermediate could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Raster encoding failed.
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// A user-supplied image could not be decoded.
    #[error("Image decoding failed: {0}")]
    Decode(String),

    /// The image source is not usable from this process.
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),
}
