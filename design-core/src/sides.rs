//! Dual-sided design tracking.
//!
//! For products that print on both faces, each side keeps an
//! independent completeness flag, an elements snapshot used to restore
//! the side when the user swaps back to it, and an exported design
//! image destined for the cart payload. Side swaps must capture the
//! outgoing side before anything clears the live surface
//! (capture-before-clear), otherwise content is lost silently.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::product::View;
use crate::surface::Surface;

/// Per-side design state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideState {
    /// Whether the side satisfies the completeness predicate.
    pub complete: bool,
    /// Serialized surface snapshot used to restore this side.
    pub snapshot: Option<String>,
    /// Exported design image (data URI) for the cart payload.
    pub image: Option<String>,
}

/// Tracks front/back completeness for dual-sided products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideTracker {
    dual_sided: bool,
    front: SideState,
    back: SideState,
}

impl SideTracker {
    /// Create a tracker in single-side mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether dual-sided mode is active.
    #[must_use]
    pub fn is_dual_sided(&self) -> bool {
        self.dual_sided
    }

    /// Turn dual-sided mode on, seeding the currently viewed side from
    /// the live surface content.
    pub fn enable(&mut self, surface: &Surface, image: Option<String>) {
        self.dual_sided = true;
        self.front = SideState::default();
        self.back = SideState::default();
        self.capture(surface, image);
    }

    /// Turn dual-sided mode off, discarding both side states.
    pub fn disable(&mut self) {
        self.dual_sided = false;
        self.front = SideState::default();
        self.back = SideState::default();
    }

    /// Capture the live surface into the state of its own view.
    ///
    /// Callers swapping sides must invoke this before clearing the
    /// surface. A snapshot that fails to serialize is logged and the
    /// previous snapshot for the side is kept.
    pub fn capture(&mut self, surface: &Surface, image: Option<String>) {
        let complete = surface.has_design_content();
        let snapshot = match surface.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!("Side capture failed for {}: {e}", surface.view);
                None
            }
        };
        let state = self.side_mut(surface.view);
        state.complete = complete;
        if snapshot.is_some() {
            state.snapshot = snapshot;
        }
        if image.is_some() {
            state.image = image;
        }
    }

    /// Recompute the live side's completeness flag from the surface.
    pub fn refresh_completeness(&mut self, surface: &Surface) {
        if self.dual_sided {
            self.side_mut(surface.view).complete = surface.has_design_content();
        }
    }

    /// Stored snapshot for a side, used when swapping back to it.
    #[must_use]
    pub fn snapshot_for(&self, view: View) -> Option<&str> {
        self.side(view).snapshot.as_deref()
    }

    /// Stored design image for a side.
    #[must_use]
    pub fn image_for(&self, view: View) -> Option<&str> {
        self.side(view).image.as_deref()
    }

    /// Terminal validation gate.
    ///
    /// Single-side: the live surface must have content. Dual-sided:
    /// both sides must be complete, with the live side recomputed from
    /// the surface first so repeated calls without mutation agree.
    ///
    /// # Errors
    ///
    /// Returns the side-specific [`CartError`] blocking the hand-off.
    pub fn validate(&self, surface: &Surface) -> Result<(), CartError> {
        if !self.dual_sided {
            return if surface.has_design_content() {
                Ok(())
            } else {
                Err(CartError::EmptyDesign)
            };
        }

        let live = surface.view;
        let front_complete = if live == View::Front {
            surface.has_design_content()
        } else {
            self.front.complete
        };
        let back_complete = if live == View::Back {
            surface.has_design_content()
        } else {
            self.back.complete
        };

        match (front_complete, back_complete) {
            (true, true) => Ok(()),
            (false, false) => Err(CartError::EmptyDesign),
            (false, true) => Err(CartError::SideIncomplete(View::Front)),
            (true, false) => Err(CartError::SideIncomplete(View::Back)),
        }
    }

    fn side(&self, view: View) -> &SideState {
        match view {
            View::Front => &self.front,
            View::Back => &self.back,
        }
    }

    fn side_mut(&mut self, view: View) -> &mut SideState {
        match view {
            View::Front => &mut self.front,
            View::Back => &mut self.back,
        }
    }
}
