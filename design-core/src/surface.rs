//! The scene surface: one bounded drawing area per product view.
//!
//! A surface owns the background mockup singleton and a draw-ordered
//! collection of interactive elements. The whole surface serializes to
//! JSON; that serialized form is the snapshot unit used by undo/redo
//! and by dual-sided side preservation.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, ElementKind, ImageFormat, Transform};
use crate::error::{DesignError, DesignResult};
use crate::product::{ProductType, View};

/// Fallback fill color used when the mockup image fails to load.
const FALLBACK_FILL: &str = "#f5f5f5";

/// Background mockup occupies at most this fraction of the smaller
/// surface dimension.
const BACKGROUND_MAX_FRACTION: f32 = 0.8;

/// A decoded background mockup ready to attach to a surface.
#[derive(Debug, Clone)]
pub struct LoadedBackground {
    /// Image source path or data URI.
    pub src: String,
    /// Image format.
    pub format: ImageFormat,
    /// Natural width in pixels.
    pub width: f32,
    /// Natural height in pixels.
    pub height: f32,
}

/// Resolves the mockup image for a `(product, view)` pair.
///
/// Loading is treated as asynchronous by the session: callers take a
/// [`BackgroundTicket`] before resolving and hand the result back
/// through [`Surface::finish_background_load`], which discards results
/// that arrive for a surface that has since moved on.
pub trait BackgroundResolver {
    /// Resolve the background for the given product and view.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ResourceLoad`] if the mockup image is
    /// unavailable; the surface then falls back to a solid fill.
    fn resolve(&self, product: ProductType, view: View) -> DesignResult<LoadedBackground>;
}

/// Default resolver backed by the static product catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBackgrounds;

impl BackgroundResolver for StaticBackgrounds {
    fn resolve(&self, product: ProductType, view: View) -> DesignResult<LoadedBackground> {
        let (width, height) = match product {
            ProductType::Tshirt => (600.0, 700.0),
            ProductType::Mug => (500.0, 500.0),
            ProductType::Cap => (520.0, 400.0),
        };
        Ok(LoadedBackground {
            src: product.spec().mockup_path(view).to_string(),
            format: ImageFormat::Png,
            width,
            height,
        })
    }
}

/// Identity token for an in-flight background load.
///
/// Captures the surface generation and `(product, view)` at request
/// time so a superseded load completing late is discarded instead of
/// being applied to a no-longer-current surface.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundTicket {
    generation: u64,
    product: ProductType,
    view: View,
}

/// The bounded drawing area for one product view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    /// Product type this surface belongs to.
    pub product: ProductType,
    /// View being designed.
    pub view: View,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f32,
    /// Pan offset X.
    pub pan_x: f32,
    /// Pan offset Y.
    pub pan_y: f32,
    /// Solid fill shown when no background image is attached.
    pub fill: String,
    /// The background mockup singleton, if loaded.
    background: Option<Element>,
    /// Interactive elements in draw order (lowest first).
    elements: Vec<Element>,
    /// Currently selected element.
    selected: Option<ElementId>,
    /// Monotonic id for stale background-load detection.
    #[serde(skip)]
    generation: u64,
}

impl Surface {
    /// Allocate a surface sized per the product's static spec.
    #[must_use]
    pub fn new(product: ProductType, view: View) -> Self {
        let spec = product.spec();
        Self {
            product,
            view,
            width: spec.surface_width,
            height: spec.surface_height,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            fill: FALLBACK_FILL.to_string(),
            background: None,
            elements: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    /// Begin a background load for the current `(product, view)`.
    ///
    /// Bumps the surface generation so any load still in flight for the
    /// previous background is invalidated.
    pub fn begin_background_load(&mut self) -> BackgroundTicket {
        self.generation += 1;
        BackgroundTicket {
            generation: self.generation,
            product: self.product,
            view: self.view,
        }
    }

    /// Complete a background load.
    ///
    /// Stale tickets (superseded generation or mismatched product/view)
    /// are discarded silently. A load failure drops the background and
    /// leaves the solid fill in place. On success the mockup is scaled
    /// to at most 80% of the smaller surface dimension, centered,
    /// marked non-interactive, and kept lowest in draw order; elements
    /// added while the load was pending are re-attached with their
    /// interaction flags re-enabled.
    ///
    /// Returns `true` if the background was applied.
    pub fn finish_background_load(
        &mut self,
        ticket: BackgroundTicket,
        result: DesignResult<LoadedBackground>,
    ) -> bool {
        if ticket.generation != self.generation
            || ticket.product != self.product
            || ticket.view != self.view
        {
            tracing::debug!(
                "Discarding stale background load for {}/{}",
                ticket.product,
                ticket.view
            );
            return false;
        }

        let loaded = match result {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(
                    "Background load failed for {}/{}: {e}; using solid fill",
                    self.product,
                    self.view
                );
                self.background = None;
                return false;
            }
        };

        let max_dim = BACKGROUND_MAX_FRACTION * self.width.min(self.height);
        let scale = max_dim / loaded.width.max(loaded.height).max(1.0);
        let scaled_w = loaded.width * scale;
        let scaled_h = loaded.height * scale;

        let background = Element::background(ElementKind::Image {
            src: loaded.src,
            format: loaded.format,
        })
        .with_transform(Transform {
            x: (self.width - scaled_w) / 2.0,
            y: (self.height - scaled_h) / 2.0,
            width: loaded.width,
            height: loaded.height,
            scale_x: scale,
            scale_y: scale,
            z_index: i32::MIN,
            ..Transform::default()
        });
        self.background = Some(background);

        // Elements queued while the load was pending survive the swap.
        for element in &mut self.elements {
            element.selectable = true;
            element.evented = true;
        }
        true
    }

    /// The background mockup singleton, if one is attached.
    #[must_use]
    pub fn background(&self) -> Option<&Element> {
        self.background.as_ref()
    }

    /// Append an interactive element and make it the active selection.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        debug_assert!(!element.is_background);
        let id = element.id;
        for existing in &mut self.elements {
            existing.selected = false;
        }
        let mut element = element;
        element.selected = true;
        self.elements.push(element);
        self.selected = Some(id);
        id
    }

    /// Remove every non-background element, preserving the mockup.
    pub fn remove_all_non_background(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Interactive elements in draw order.
    #[must_use]
    pub fn non_background_elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get a mutable reference to an interactive element by ID.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Get an interactive element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Completeness predicate: at least one non-background element.
    #[must_use]
    pub fn has_design_content(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Serialize the full surface (elements and background) to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DesignResult<String> {
        serde_json::to_string(self).map_err(DesignError::Snapshot)
    }

    /// Deserialize a surface from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> DesignResult<Self> {
        serde_json::from_str(json).map_err(DesignError::Snapshot)
    }

    /// Restore content from a snapshot while keeping this surface's
    /// dimensions and load generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be parsed; the surface
    /// is left untouched in that case.
    pub fn apply_snapshot(&mut self, json: &str) -> DesignResult<()> {
        let restored = Self::from_json(json)?;
        self.view = restored.view;
        self.fill = restored.fill;
        self.background = restored.background;
        self.elements = restored.elements;
        self.selected = restored.selected;
        Ok(())
    }
}
