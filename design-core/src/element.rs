//! Design elements - the interactive objects placed on a surface.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::Rect;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type of content an element contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ElementKind {
    /// A line of user text.
    Text {
        /// Text content.
        content: String,
        /// Font family name.
        font_family: String,
        /// Fill color as hex.
        fill: String,
        /// Font size in pixels.
        font_size: f32,
    },

    /// A raster image (uploaded file or URL).
    Image {
        /// Image source URI or base64 data URI.
        src: String,
        /// Image format.
        format: ImageFormat,
    },

    /// A single emoji glyph rendered as oversized text.
    Emoji {
        /// The emoji glyph.
        glyph: String,
        /// Render size in pixels.
        font_size: f32,
    },
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Best-effort detection from a source string: data-URI MIME type
    /// first, then file extension.
    #[must_use]
    pub fn from_src(src: &str) -> Self {
        if let Some(rest) = src.strip_prefix("data:image/") {
            let mime = rest.split(&[';', ','][..]).next().unwrap_or("");
            return match mime {
                "png" => Self::Png,
                "jpeg" | "jpg" => Self::Jpeg,
                "webp" => Self::WebP,
                _ => Self::Unknown,
            };
        }
        match src.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
            Some("png") => Self::Png,
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("webp") => Self::WebP,
            _ => Self::Unknown,
        }
    }
}

/// Transform for positioning and sizing elements.
///
/// `(x, y)` is the top-left corner in surface coordinates. The
/// effective on-surface size is `width * scale_x` by `height * scale_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// X position (pixels from surface left).
    pub x: f32,
    /// Y position (pixels from surface top).
    pub y: f32,
    /// Natural width in pixels before scaling.
    pub width: f32,
    /// Natural height in pixels before scaling.
    pub height: f32,
    /// Horizontal scale factor.
    pub scale_x: f32,
    /// Vertical scale factor.
    pub scale_y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Z-index for layering.
    pub z_index: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            z_index: 0,
        }
    }
}

impl Transform {
    /// Effective width after scaling.
    #[must_use]
    pub fn scaled_width(&self) -> f32 {
        self.width * self.scale_x
    }

    /// Effective height after scaling.
    #[must_use]
    pub fn scaled_height(&self) -> f32 {
        self.height * self.scale_y
    }
}

/// A design object on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element content type.
    pub kind: ElementKind,
    /// Position and size.
    pub transform: Transform,
    /// Whether this element is currently selected.
    pub selected: bool,
    /// Whether this element can be picked by the user.
    pub selectable: bool,
    /// Whether this element receives pointer events.
    pub evented: bool,
    /// True only for the product mockup layer.
    pub is_background: bool,
    /// Set once the element has been centered on first add, so later
    /// default-add events do not re-center a user-moved object.
    pub positioned: bool,
}

impl Element {
    /// Create a new interactive element with the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            transform: Transform::default(),
            selected: false,
            selectable: true,
            evented: true,
            is_background: false,
            positioned: false,
        }
    }

    /// Create the non-interactive background mockup layer.
    #[must_use]
    pub fn background(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            transform: Transform {
                z_index: i32::MIN,
                ..Transform::default()
            },
            selected: false,
            selectable: false,
            evented: false,
            is_background: true,
            positioned: true,
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// The element's axis-aligned bounding box in surface coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            left: self.transform.x,
            top: self.transform.y,
            width: self.transform.scaled_width(),
            height: self.transform.scaled_height(),
        }
    }
}
