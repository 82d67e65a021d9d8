//! Exporter seam between the engine and the raster pipeline.
//!
//! The trait lives here so the session controller can drive exports
//! without depending on the renderer crate; `design-renderer`
//! implements it.

use crate::error::DesignResult;
use crate::surface::Surface;

/// Produces raster snapshots of a surface as base64 PNG data URIs at
/// surface scale (no DPI upscaling).
///
/// Implementations read the surface immutably, so preview export can
/// never leave the persistent surface in a broken state regardless of
/// how rasterization exits.
pub trait DesignExporter {
    /// Rasterize the interactive elements only, on a transparent fill
    /// with the background mockup excluded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DesignError::Render`] if rasterization fails.
    fn export_preview(&self, surface: &Surface) -> DesignResult<String>;

    /// Rasterize the full surface at full quality for the cart
    /// hand-off, with or without the background mockup.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DesignError::Render`] if rasterization fails.
    fn export_final(&self, surface: &Surface, include_background: bool) -> DesignResult<String>;
}
