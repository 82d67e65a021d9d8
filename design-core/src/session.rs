//! The design session controller.
//!
//! Orchestration only: wires user actions to the surface, boundary
//! enforcer, history manager, and side tracker, and performs the
//! inventory-gated hand-off to the surrounding cart system. This is the
//! single seam where internal failures become either silent recovery or
//! a user-visible [`CartError`]; nothing below it is allowed to escape
//! uncaught.

use uuid::Uuid;

use crate::bounds::{print_area, BoundaryEnforcer, Rect};
use crate::cart::{CartLineItem, CartSink};
use crate::element::{Element, ElementId, ElementKind, ImageFormat, Transform};
use crate::error::{CartError, DesignError, DesignResult};
use crate::export::DesignExporter;
use crate::history::HistoryManager;
use crate::inventory::InventoryProvider;
use crate::product::{ProductType, View};
use crate::sides::SideTracker;
use crate::surface::{BackgroundResolver, StaticBackgrounds, Surface};

/// Default font size for new text elements.
const TEXT_FONT_SIZE: f32 = 30.0;

/// Render size for emoji glyphs.
const EMOJI_FONT_SIZE: f32 = 64.0;

/// Rough advance width per character, as a fraction of font size.
const TEXT_ADVANCE: f32 = 0.55;

/// Owns the live surface for one design session.
///
/// Exactly one controller mutates a surface at a time; hosts embed one
/// session per open designer.
pub struct DesignSession {
    product: ProductType,
    view: View,
    size: String,
    surface: Surface,
    history: HistoryManager,
    sides: SideTracker,
    backgrounds: Box<dyn BackgroundResolver>,
    overlay: Option<Rect>,
}

impl DesignSession {
    /// Start a session for a product using the static mockup catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial history snapshot cannot be
    /// serialized.
    pub fn new(product: ProductType) -> DesignResult<Self> {
        Self::with_resolver(product, Box::new(StaticBackgrounds))
    }

    /// Start a session with a custom background resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial history snapshot cannot be
    /// serialized.
    pub fn with_resolver(
        product: ProductType,
        backgrounds: Box<dyn BackgroundResolver>,
    ) -> DesignResult<Self> {
        let spec = product.spec();
        let mut surface = Surface::new(product, View::Front);
        let ticket = surface.begin_background_load();
        let result = backgrounds.resolve(product, View::Front);
        surface.finish_background_load(ticket, result);

        let history = HistoryManager::seeded(&surface)?;
        Ok(Self {
            product,
            view: View::Front,
            size: spec.default_size_label().to_string(),
            surface,
            history,
            sides: SideTracker::new(),
            backgrounds,
            overlay: Some(spec.print_overlay),
        })
    }

    /// The active product type.
    #[must_use]
    pub fn product(&self) -> ProductType {
        self.product
    }

    /// The active view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// The selected size label.
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Whether dual-sided mode is active.
    #[must_use]
    pub fn is_dual_sided(&self) -> bool {
        self.sides.is_dual_sided()
    }

    /// Read access to the live surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Override or clear the printable-area overlay. Clearing disables
    /// boundary enforcement for the remainder of the session.
    pub fn set_print_overlay(&mut self, overlay: Option<Rect>) {
        self.overlay = overlay;
    }

    fn enforcer(&self) -> BoundaryEnforcer {
        BoundaryEnforcer::new(print_area(
            self.overlay,
            self.surface.zoom,
            self.surface.pan_x,
            self.surface.pan_y,
        ))
    }

    /// Snapshot the surface and recompute side completeness after a
    /// committed mutation.
    fn commit(&mut self) {
        self.history.record(&self.surface);
        self.sides.refresh_completeness(&self.surface);
    }

    fn place_and_add(&mut self, mut element: Element) -> ElementId {
        let enforcer = self.enforcer();
        enforcer.center_unpositioned(&mut element, self.surface.width, self.surface.height);
        enforcer.clamp_scale(&mut element);
        let id = self.surface.add_element(element);
        self.commit();
        id
    }

    /// Add a text element centered in the printable area.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_text(
        &mut self,
        content: impl Into<String>,
        fill: impl Into<String>,
        font_family: impl Into<String>,
    ) -> ElementId {
        let content = content.into();
        let width = (content.chars().count() as f32 * TEXT_FONT_SIZE * TEXT_ADVANCE).max(10.0);
        let element = Element::new(ElementKind::Text {
            content,
            font_family: font_family.into(),
            fill: fill.into(),
            font_size: TEXT_FONT_SIZE,
        })
        .with_transform(Transform {
            width,
            height: TEXT_FONT_SIZE * 1.2,
            ..Transform::default()
        });
        self.place_and_add(element)
    }

    /// Add an image element from a URL or data URI, using the natural
    /// dimensions probed by the host.
    pub fn add_image(&mut self, src: impl Into<String>, width: f32, height: f32) -> ElementId {
        let src = src.into();
        let format = ImageFormat::from_src(&src);
        let element = Element::new(ElementKind::Image { src, format }).with_transform(Transform {
            width: width.max(1.0),
            height: height.max(1.0),
            ..Transform::default()
        });
        self.place_and_add(element)
    }

    /// Add an emoji element centered in the printable area.
    pub fn add_emoji(&mut self, glyph: impl Into<String>) -> ElementId {
        let element = Element::new(ElementKind::Emoji {
            glyph: glyph.into(),
            font_size: EMOJI_FONT_SIZE,
        })
        .with_transform(Transform {
            width: EMOJI_FONT_SIZE * 1.1,
            height: EMOJI_FONT_SIZE * 1.1,
            ..Transform::default()
        });
        self.place_and_add(element)
    }

    /// Move an element as part of a live drag. The position is clamped
    /// to the printable area; no history entry is taken until
    /// [`Self::commit_gesture`].
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] for an unknown id.
    pub fn drag_element(&mut self, id: ElementId, x: f32, y: f32) -> DesignResult<()> {
        let enforcer = self.enforcer();
        let element = self
            .surface
            .element_mut(id)
            .ok_or_else(|| DesignError::ElementNotFound(id.to_string()))?;
        element.transform.x = x;
        element.transform.y = y;
        enforcer.clamp_move(element);
        Ok(())
    }

    /// Scale an element as part of a live pinch/handle gesture. The
    /// scale is clamped so the element stays inside the printable area.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ElementNotFound`] for an unknown id.
    pub fn scale_element(&mut self, id: ElementId, scale: f32) -> DesignResult<()> {
        let enforcer = self.enforcer();
        let element = self
            .surface
            .element_mut(id)
            .ok_or_else(|| DesignError::ElementNotFound(id.to_string()))?;
        element.transform.scale_x = scale.max(0.01);
        element.transform.scale_y = scale.max(0.01);
        enforcer.clamp_scale(element);
        Ok(())
    }

    /// Settle the current gesture: snapshot the surface and recompute
    /// completeness.
    pub fn commit_gesture(&mut self) {
        self.commit();
    }

    /// Step backward through history. No-op at the initial state.
    ///
    /// Returns `true` if a state was restored.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo(&mut self.surface);
        if restored {
            self.view = self.surface.view;
            self.sides.refresh_completeness(&self.surface);
        }
        restored
    }

    /// Step forward through history. No-op when nothing was undone.
    ///
    /// Returns `true` if a state was restored.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo(&mut self.surface);
        if restored {
            self.view = self.surface.view;
            self.sides.refresh_completeness(&self.surface);
        }
        restored
    }

    /// Whether an undo would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Remove every design element, preserving the background mockup.
    pub fn clear_canvas(&mut self) {
        self.surface.remove_all_non_background();
        self.commit();
    }

    /// Select a size for the current product.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidOperation`] for a size the product
    /// does not offer.
    pub fn select_size(&mut self, size: &str) -> DesignResult<()> {
        if !self.product.spec().sizes.contains(&size) {
            return Err(DesignError::InvalidOperation(format!(
                "size {size} not offered for {}",
                self.product
            )));
        }
        self.size = size.to_string();
        Ok(())
    }

    /// Switch to a different product: tears down the surface, resets
    /// the view to front, the size to the product default, and turns
    /// dual-sided mode off.
    ///
    /// # Errors
    ///
    /// Returns an error if the fresh history cannot be seeded.
    pub fn select_product(&mut self, product: ProductType) -> DesignResult<()> {
        let spec = product.spec();
        self.product = product;
        self.view = View::Front;
        self.size = spec.default_size_label().to_string();
        self.sides.disable();
        self.overlay = Some(spec.print_overlay);

        self.surface = Surface::new(product, View::Front);
        self.reload_background();
        self.history = HistoryManager::seeded(&self.surface)?;
        Ok(())
    }

    /// Toggle dual-sided mode.
    ///
    /// Enabling snapshots the current canvas as the live side's design
    /// image and seeds its completeness; disabling discards both side
    /// states. Export failures while capturing are logged and the side
    /// is seeded without an image.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidOperation`] if the product does
    /// not support dual-sided printing.
    pub fn toggle_dual_sided(
        &mut self,
        enabled: bool,
        exporter: &dyn DesignExporter,
    ) -> DesignResult<()> {
        if enabled == self.sides.is_dual_sided() {
            return Ok(());
        }
        if enabled {
            if !self.product.spec().supports_dual_sided {
                return Err(DesignError::InvalidOperation(format!(
                    "{} does not support dual-sided printing",
                    self.product
                )));
            }
            let image = self.capture_side_image(exporter);
            self.sides.enable(&self.surface, image);
        } else {
            self.sides.disable();
        }
        Ok(())
    }

    /// Change the active view.
    ///
    /// Dual-sided: captures the outgoing side before anything is
    /// cleared, then reloads the destination side's snapshot once the
    /// new background is in place (blank if the side was never
    /// visited). Single-side: reloads the background only, keeping the
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidOperation`] for a view the product
    /// does not have.
    pub fn change_view(&mut self, view: View, exporter: &dyn DesignExporter) -> DesignResult<()> {
        if view == self.view {
            return Ok(());
        }
        if !self.product.spec().views.contains(&view) {
            return Err(DesignError::InvalidOperation(format!(
                "{} has no {view} view",
                self.product
            )));
        }

        if self.sides.is_dual_sided() {
            // Capture-before-clear: the outgoing side is snapshotted
            // before the surface is touched.
            let image = self.capture_side_image(exporter);
            self.sides.capture(&self.surface, image);

            self.surface.remove_all_non_background();
            self.view = view;
            self.surface.view = view;
            self.reload_background();

            if let Some(snapshot) = self.sides.snapshot_for(view).map(str::to_string) {
                if let Err(e) = self.surface.apply_snapshot(&snapshot) {
                    tracing::warn!("Could not restore {view} side: {e}");
                }
            }
        } else {
            self.view = view;
            self.surface.view = view;
            self.reload_background();
        }

        self.commit();
        Ok(())
    }

    /// Terminal validation gate: completeness of the one side, or of
    /// both sides when dual-sided. Repeated calls without mutation
    /// return the same result.
    #[must_use]
    pub fn validate_design(&self) -> bool {
        self.sides.validate(&self.surface).is_ok()
    }

    /// Rasterize the interactive elements for the live preview pane.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Render`] if the exporter fails.
    pub fn export_preview(&self, exporter: &dyn DesignExporter) -> DesignResult<String> {
        exporter.export_preview(&self.surface)
    }

    /// Validate, check stock, export, and hand the finished design to
    /// the cart.
    ///
    /// The stock check is advisory; the decrement request after the
    /// hand-off is the external authority's to refuse. On any error the
    /// session is left untouched so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns the user-facing [`CartError`] that blocked the hand-off.
    pub fn add_to_cart(
        &mut self,
        inventory: &mut dyn InventoryProvider,
        cart: &mut dyn CartSink,
        exporter: &dyn DesignExporter,
    ) -> Result<CartLineItem, CartError> {
        self.sides.validate(&self.surface)?;

        let stock = inventory.stock_for(self.product);
        let available = stock.get(&self.size).copied().unwrap_or(0);
        if available == 0 {
            return Err(CartError::OutOfStock {
                size: self.size.clone(),
            });
        }

        let spec = self.product.spec();
        let dual = self.sides.is_dual_sided();

        let live_image = exporter
            .export_final(&self.surface, false)
            .map_err(|e| CartError::Export(e.to_string()))?;

        let (image, back_image) = if dual {
            let other = self.view.opposite();
            let other_image = self
                .sides
                .image_for(other)
                .map(str::to_string)
                .ok_or(CartError::MissingSideImage(other))?;
            match self.view {
                View::Front => (live_image, Some(other_image)),
                View::Back => (other_image, Some(live_image)),
            }
        } else {
            (live_image, None)
        };

        let unit_price_cents = spec.base_price_cents
            + if dual {
                spec.dual_sided_surcharge_cents
            } else {
                0
            };

        let item = CartLineItem {
            id: Uuid::new_v4(),
            display_name: spec.display_name.to_string(),
            unit_price_cents,
            image,
            back_image,
            size: self.size.clone(),
            side_label: if dual { "front+back" } else { "front" }.to_string(),
        };
        cart.add(item.clone());

        if !inventory.decrement(self.product, &self.size, 1) {
            // The order-placement collaborator owns the real decrement.
            tracing::warn!(
                "Advisory decrement refused for {}/{}",
                self.product,
                self.size
            );
        }

        Ok(item)
    }

    /// Export the live side's design-only image, logging failures.
    fn capture_side_image(&self, exporter: &dyn DesignExporter) -> Option<String> {
        match exporter.export_preview(&self.surface) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Side image capture failed: {e}");
                None
            }
        }
    }

    fn reload_background(&mut self) {
        let ticket = self.surface.begin_background_load();
        let result = self.backgrounds.resolve(self.product, self.view);
        self.surface.finish_background_load(ticket, result);
    }
}

impl std::fmt::Debug for DesignSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignSession")
            .field("product", &self.product)
            .field("view", &self.view)
            .field("size", &self.size)
            .field("dual_sided", &self.sides.is_dual_sided())
            .finish_non_exhaustive()
    }
}
