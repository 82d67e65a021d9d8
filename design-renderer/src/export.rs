//! Surface export through an SVG intermediate and the resvg/tiny-skia
//! rasterization pipeline.
//!
//! Two raster products exist: the live preview (interactive elements
//! only, transparent fill, background mockup excluded) and the final
//! cart image (background included or excluded per call site). Both
//! come back as base64 PNG data URIs at surface scale.

use std::fmt::Write;

use design_core::{DesignExporter, DesignResult, Element, ElementKind, Surface};

use crate::error::{RenderError, RenderResult};
use crate::image::png_data_uri;

/// Which layers of the surface to rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLayers {
    /// Background mockup, solid fill, and design elements.
    All,
    /// Design elements only, on a transparent fill.
    DesignOnly,
}

/// Rasterizes a [`Surface`] into PNG data URIs.
///
/// The exporter reads the surface immutably; no visibility toggling or
/// fill swapping is ever persisted, so a failed export cannot leave the
/// surface in a broken state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceExporter;

impl SurfaceExporter {
    /// Create an exporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the surface to an SVG string.
    ///
    /// # Errors
    ///
    /// Currently infallible but returns `Result` to match the raster
    /// paths that build on it.
    #[allow(clippy::unused_self)]
    pub fn render_to_svg(&self, surface: &Surface, layers: ExportLayers) -> RenderResult<String> {
        let width = surface.width;
        let height = surface.height;

        let mut svg = String::with_capacity(2048);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        );

        if layers == ExportLayers::All {
            let fill = escape_xml(&surface.fill);
            let _ = write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" fill=\"{fill}\"/>",
            );
            if let Some(background) = surface.background() {
                render_element_svg(&mut svg, background);
            }
        }

        let mut elements: Vec<&Element> = surface.non_background_elements().iter().collect();
        elements.sort_by_key(|e| e.transform.z_index);
        for element in elements {
            render_element_svg(&mut svg, element);
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Render the surface to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or encoding fails.
    pub fn render_to_png(&self, surface: &Surface, layers: ExportLayers) -> RenderResult<Vec<u8>> {
        let svg = self.render_to_svg(surface, layers)?;
        let pixmap = rasterize_svg(&svg)?;
        pixmap.encode_png().map_err(|e| {
            tracing::warn!("PNG encoding failed during export: {e}");
            RenderError::Encode(format!("PNG encoding failed: {e}"))
        })
    }

    /// Render the surface to a base64 PNG data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or encoding fails.
    pub fn render_to_data_uri(
        &self,
        surface: &Surface,
        layers: ExportLayers,
    ) -> RenderResult<String> {
        Ok(png_data_uri(&self.render_to_png(surface, layers)?))
    }
}

impl DesignExporter for SurfaceExporter {
    fn export_preview(&self, surface: &Surface) -> DesignResult<String> {
        self.render_to_data_uri(surface, ExportLayers::DesignOnly)
            .map_err(|e| design_core::DesignError::Render(e.to_string()))
    }

    fn export_final(&self, surface: &Surface, include_background: bool) -> DesignResult<String> {
        let layers = if include_background {
            ExportLayers::All
        } else {
            ExportLayers::DesignOnly
        };
        self.render_to_data_uri(surface, layers)
            .map_err(|e| design_core::DesignError::Render(e.to_string()))
    }
}

/// Rasterize an SVG string to a tiny-skia pixmap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize_svg(svg: &str) -> RenderResult<tiny_skia::Pixmap> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| {
        tracing::warn!("SVG parsing failed during export: {e}");
        RenderError::Svg(e.to_string())
    })?;

    let px_w = tree.size().width() as u32;
    let px_h = tree.size().height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| RenderError::Encode("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Render a single element to SVG.
fn render_element_svg(svg: &mut String, element: &Element) {
    let tf = &element.transform;

    match &element.kind {
        ElementKind::Text {
            content,
            font_family,
            fill,
            font_size,
        } => {
            let escaped = escape_xml(content);
            let escaped_fill = escape_xml(fill);
            let escaped_family = escape_xml(font_family);
            let size = font_size * tf.scale_y;
            let text_y = tf.y + size;
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{text_y}\" font-size=\"{size}\" fill=\"{escaped_fill}\" font-family=\"{escaped_family}\">{escaped}</text>",
                tf.x,
            );
        }

        ElementKind::Emoji { glyph, font_size } => {
            let escaped = escape_xml(glyph);
            let size = font_size * tf.scale_y;
            let text_y = tf.y + size;
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{text_y}\" font-size=\"{size}\">{escaped}</text>",
                tf.x,
            );
        }

        ElementKind::Image { src, .. } => {
            let escaped_src = escape_xml(src);
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{escaped_src}\"/>",
                tf.x,
                tf.y,
                tf.scaled_width(),
                tf.scaled_height(),
            );
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_core::{BackgroundResolver, ElementKind, ProductType, StaticBackgrounds, Transform, View};

    fn surface_with_text(content: &str) -> Surface {
        let mut surface = Surface::new(ProductType::Tshirt, View::Front);
        let ticket = surface.begin_background_load();
        let result = StaticBackgrounds.resolve(ProductType::Tshirt, View::Front);
        surface.finish_background_load(ticket, result);
        surface.add_element(
            Element::new(ElementKind::Text {
                content: content.to_string(),
                font_family: "Arial".to_string(),
                fill: "#112233".to_string(),
                font_size: 30.0,
            })
            .with_transform(Transform {
                x: 150.0,
                y: 200.0,
                width: 120.0,
                height: 36.0,
                ..Transform::default()
            }),
        );
        surface
    }

    #[test]
    fn test_svg_contains_text_and_fill() {
        let surface = surface_with_text("HELLO");
        let exporter = SurfaceExporter::new();
        let svg = exporter
            .render_to_svg(&surface, ExportLayers::All)
            .expect("svg");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("HELLO"));
        assert!(svg.contains("#112233"));
        assert!(svg.contains("viewBox=\"0 0 500 600\""));
    }

    #[test]
    fn test_design_only_excludes_background() {
        let surface = surface_with_text("HELLO");
        let exporter = SurfaceExporter::new();

        let all = exporter
            .render_to_svg(&surface, ExportLayers::All)
            .expect("svg");
        let design_only = exporter
            .render_to_svg(&surface, ExportLayers::DesignOnly)
            .expect("svg");

        assert!(all.contains("mockups/tshirt-front.png"));
        assert!(all.contains("<rect"));
        assert!(!design_only.contains("mockups/tshirt-front.png"));
        assert!(!design_only.contains("<rect"));
    }

    #[test]
    fn test_png_export_magic_bytes() {
        let surface = surface_with_text("HELLO");
        let exporter = SurfaceExporter::new();
        let png = exporter
            .render_to_png(&surface, ExportLayers::DesignOnly)
            .expect("png");
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_data_uri_prefix() {
        let surface = surface_with_text("HELLO");
        let exporter = SurfaceExporter::new();
        let uri = exporter
            .render_to_data_uri(&surface, ExportLayers::DesignOnly)
            .expect("uri");
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_xml_escaping() {
        let surface = surface_with_text("A < B & C");
        let exporter = SurfaceExporter::new();
        let svg = exporter
            .render_to_svg(&surface, ExportLayers::DesignOnly)
            .expect("svg");
        assert!(svg.contains("A &lt; B &amp; C"));
    }

    #[test]
    fn test_emoji_rendered_as_text_node() {
        let mut surface = Surface::new(ProductType::Mug, View::Front);
        surface.add_element(Element::new(ElementKind::Emoji {
            glyph: "🔥".to_string(),
            font_size: 64.0,
        }));
        let exporter = SurfaceExporter::new();
        let svg = exporter
            .render_to_svg(&surface, ExportLayers::DesignOnly)
            .expect("svg");
        assert!(svg.contains("🔥"));
        assert!(svg.contains("font-size=\"64\""));
    }

    #[test]
    fn test_scaled_image_dimensions_in_svg() {
        let mut surface = Surface::new(ProductType::Mug, View::Front);
        surface.add_element(
            Element::new(ElementKind::Image {
                src: "art.png".to_string(),
                format: design_core::ImageFormat::Png,
            })
            .with_transform(Transform {
                width: 100.0,
                height: 50.0,
                scale_x: 2.0,
                scale_y: 2.0,
                ..Transform::default()
            }),
        );
        let exporter = SurfaceExporter::new();
        let svg = exporter
            .render_to_svg(&surface, ExportLayers::DesignOnly)
            .expect("svg");
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("height=\"100\""));
    }
}
