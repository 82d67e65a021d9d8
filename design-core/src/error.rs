//! Error types for design engine operations.

use thiserror::Error;

use crate::product::View;

/// Result type for design engine operations.
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors that can occur inside the design engine.
///
/// These are internal failures; they are caught and logged at the
/// session controller boundary and never surface to the user directly.
#[derive(Debug, Error)]
pub enum DesignError {
    /// Element not found on the surface.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Operation not valid for the current product or mode.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Surface snapshot serialization/deserialization error.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Background or user image could not be loaded.
    #[error("Failed to load resource: {0}")]
    ResourceLoad(String),

    /// Rasterization/export error reported by the exporter.
    #[error("Render error: {0}")]
    Render(String),
}

/// User-facing failures of the add-to-cart hand-off.
///
/// Unlike [`DesignError`], every variant here maps to an actionable
/// message shown to the user. Validation and stock failures are the
/// only error kinds that propagate out of the session controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The design has no elements at all.
    #[error("Please add at least one design element before adding to cart")]
    EmptyDesign,

    /// One side of a dual-sided design has no content.
    #[error("The {0} side of your design is incomplete")]
    SideIncomplete(View),

    /// A dual-sided product was never viewed on one side, so no
    /// snapshot image exists for it.
    #[error("The {0} side has not been designed yet")]
    MissingSideImage(View),

    /// The selected size is out of stock or unknown to inventory.
    #[error("Size {size} is out of stock")]
    OutOfStock {
        /// The size label that failed the stock check.
        size: String,
    },

    /// Exporting the final image failed; the design itself is intact.
    #[error("Failed to add to cart, please try again")]
    Export(String),
}
