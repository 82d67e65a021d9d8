//! Printable-area boundary derivation and constraint enforcement.
//!
//! The boundary rectangle is never stored; it is derived on demand from
//! the printable-area overlay's on-screen bounds and the current
//! zoom/pan, expressed in the same coordinate space as elements. Every
//! constraint here clamps rather than rejects: a gesture that would
//! carry an element past the boundary repositions or rescales it so the
//! bounding box sits exactly flush with the boundary edge.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center point `(x, y)`.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether `other` lies entirely within this rectangle.
    ///
    /// A small epsilon absorbs float error from scale clamping.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 0.01;
        other.left >= self.left - EPS
            && other.top >= self.top - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Convert the overlay's on-screen bounds into surface coordinates.
///
/// Returns `None` when the overlay is missing, which disables
/// enforcement for the session rather than panicking.
#[must_use]
pub fn print_area(overlay: Option<Rect>, zoom: f32, pan_x: f32, pan_y: f32) -> Option<Rect> {
    let overlay = match overlay {
        Some(rect) => rect,
        None => {
            tracing::debug!("No printable-area overlay; boundary enforcement disabled");
            return None;
        }
    };
    if zoom <= 0.0 {
        return None;
    }
    Some(Rect {
        left: (overlay.left - pan_x) / zoom,
        top: (overlay.top - pan_y) / zoom,
        width: overlay.width / zoom,
        height: overlay.height / zoom,
    })
}

/// Applies the printable-area constraints to element transforms.
///
/// Holds the derived boundary rectangle for one enforcement pass.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryEnforcer {
    boundary: Option<Rect>,
}

impl BoundaryEnforcer {
    /// Create an enforcer for the given boundary. `None` produces a
    /// no-op enforcer (overlay missing).
    #[must_use]
    pub fn new(boundary: Option<Rect>) -> Self {
        Self { boundary }
    }

    /// Clamp an in-progress or settled move so the element's bounding
    /// box stays inside the boundary. Background elements are skipped.
    pub fn clamp_move(&self, element: &mut Element) {
        if element.is_background {
            return;
        }
        let Some(boundary) = self.boundary else {
            return;
        };
        let bounds = element.bounds();

        let max_x = boundary.right() - bounds.width;
        let max_y = boundary.bottom() - bounds.height;
        element.transform.x = element.transform.x.clamp(boundary.left, max_x.max(boundary.left));
        element.transform.y = element.transform.y.clamp(boundary.top, max_y.max(boundary.top));
    }

    /// Clamp an in-progress or settled scale. When the scaled bounding
    /// box exceeds the boundary on any side, the element is rescaled to
    /// the largest uniform factor that keeps the box fully inside,
    /// never larger than its current scale.
    pub fn clamp_scale(&self, element: &mut Element) {
        if element.is_background {
            return;
        }
        let Some(boundary) = self.boundary else {
            return;
        };
        if boundary.contains(&element.bounds()) {
            return;
        }

        let tf = &element.transform;
        let max_scale_x = if tf.width > 0.0 {
            boundary.width / tf.width
        } else {
            tf.scale_x
        };
        let max_scale_y = if tf.height > 0.0 {
            boundary.height / tf.height
        } else {
            tf.scale_y
        };
        let clamped = max_scale_x
            .min(max_scale_y)
            .min(tf.scale_x)
            .min(tf.scale_y);

        element.transform.scale_x = clamped;
        element.transform.scale_y = clamped;

        // A smaller box may still hang past an edge after rescaling.
        self.clamp_move(element);
    }

    /// Center a freshly added element within the boundary and latch its
    /// `positioned` flag so later default-add passes leave it alone.
    /// With no boundary available, centering falls back to the given
    /// surface dimensions.
    pub fn center_unpositioned(&self, element: &mut Element, surface_w: f32, surface_h: f32) {
        if element.is_background || element.positioned {
            return;
        }
        let (cx, cy) = match self.boundary {
            Some(boundary) => boundary.center(),
            None => (surface_w / 2.0, surface_h / 2.0),
        };
        let bounds = element.bounds();
        element.transform.x = cx - bounds.width / 2.0;
        element.transform.y = cy - bounds.height / 2.0;
        element.positioned = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ImageFormat, Transform};

    fn boundary() -> Rect {
        Rect {
            left: 100.0,
            top: 100.0,
            width: 300.0,
            height: 400.0,
        }
    }

    fn image_element(x: f32, y: f32, w: f32, h: f32) -> Element {
        Element::new(ElementKind::Image {
            src: "data:image/png;base64,".to_string(),
            format: ImageFormat::Png,
        })
        .with_transform(Transform {
            x,
            y,
            width: w,
            height: h,
            ..Transform::default()
        })
    }

    #[test]
    fn test_print_area_divides_by_zoom() {
        let overlay = Some(Rect {
            left: 200.0,
            top: 100.0,
            width: 400.0,
            height: 300.0,
        });
        let area = print_area(overlay, 2.0, 0.0, 0.0).expect("area");
        assert!((area.left - 100.0).abs() < f32::EPSILON);
        assert!((area.width - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_print_area_missing_overlay_is_none() {
        assert!(print_area(None, 1.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_move_clamps_flush_to_right_edge() {
        let enforcer = BoundaryEnforcer::new(Some(boundary()));
        // Target position puts the right edge 50px past the boundary.
        let mut element = image_element(350.0, 150.0, 100.0, 100.0);
        enforcer.clamp_move(&mut element);
        assert!((element.bounds().right() - boundary().right()).abs() < f32::EPSILON);
        assert!((element.transform.y - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_move_clamps_all_edges() {
        let enforcer = BoundaryEnforcer::new(Some(boundary()));
        let mut element = image_element(0.0, 0.0, 50.0, 50.0);
        enforcer.clamp_move(&mut element);
        assert!((element.transform.x - 100.0).abs() < f32::EPSILON);
        assert!((element.transform.y - 100.0).abs() < f32::EPSILON);

        let mut element = image_element(1000.0, 1000.0, 50.0, 50.0);
        enforcer.clamp_move(&mut element);
        assert!((element.bounds().right() - 400.0).abs() < f32::EPSILON);
        assert!((element.bounds().bottom() - 500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scale_clamps_to_max_uniform_fit() {
        let enforcer = BoundaryEnforcer::new(Some(boundary()));
        let mut element = image_element(100.0, 100.0, 200.0, 200.0);
        element.transform.scale_x = 3.0;
        element.transform.scale_y = 3.0;
        enforcer.clamp_scale(&mut element);
        // Max uniform fit: min(300/200, 400/200) = 1.5.
        assert!((element.transform.scale_x - 1.5).abs() < f32::EPSILON);
        assert!((element.transform.scale_y - 1.5).abs() < f32::EPSILON);
        assert!(boundary().contains(&element.bounds()));
    }

    #[test]
    fn test_scale_never_upscales() {
        let enforcer = BoundaryEnforcer::new(Some(boundary()));
        // Small element slightly past the edge: position is the
        // problem, not size, so scale must not grow toward the fit.
        let mut element = image_element(380.0, 150.0, 50.0, 50.0);
        element.transform.scale_x = 0.5;
        element.transform.scale_y = 0.5;
        enforcer.clamp_scale(&mut element);
        assert!(element.transform.scale_x <= 0.5);
        assert!(boundary().contains(&element.bounds()));
    }

    #[test]
    fn test_center_unpositioned_latches() {
        let enforcer = BoundaryEnforcer::new(Some(boundary()));
        let mut element = image_element(0.0, 0.0, 100.0, 100.0);
        enforcer.center_unpositioned(&mut element, 500.0, 600.0);
        let (cx, cy) = boundary().center();
        assert!((element.transform.x - (cx - 50.0)).abs() < f32::EPSILON);
        assert!((element.transform.y - (cy - 50.0)).abs() < f32::EPSILON);
        assert!(element.positioned);

        // A second pass must not move a user-positioned element.
        element.transform.x = 120.0;
        enforcer.center_unpositioned(&mut element, 500.0, 600.0);
        assert!((element.transform.x - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_background_is_never_constrained() {
        let enforcer = BoundaryEnforcer::new(Some(boundary()));
        let mut bg = Element::background(ElementKind::Image {
            src: "mockups/tshirt-front.png".to_string(),
            format: ImageFormat::Png,
        });
        bg.transform.x = -50.0;
        bg.transform.y = -50.0;
        enforcer.clamp_move(&mut bg);
        assert!((bg.transform.x + 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_boundary_is_noop() {
        let enforcer = BoundaryEnforcer::new(None);
        let mut element = image_element(900.0, 900.0, 100.0, 100.0);
        enforcer.clamp_move(&mut element);
        assert!((element.transform.x - 900.0).abs() < f32::EPSILON);
    }
}
