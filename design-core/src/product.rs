//! Static product catalog: surface dimensions, mockup images, print
//! areas, sizes, and pricing for the supported product types.

use serde::{Deserialize, Serialize};

use crate::bounds::Rect;

/// Product types the design canvas supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// T-shirt (apparel, dual-sided capable).
    Tshirt,
    /// Mug (single view).
    Mug,
    /// Cap (single view).
    Cap,
}

impl ProductType {
    /// The static specification for this product type.
    #[must_use]
    pub fn spec(self) -> &'static ProductSpec {
        match self {
            Self::Tshirt => &TSHIRT,
            Self::Mug => &MUG,
            Self::Cap => &CAP,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tshirt => write!(f, "tshirt"),
            Self::Mug => write!(f, "mug"),
            Self::Cap => write!(f, "cap"),
        }
    }
}

/// Which face of the product is being designed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Front face (the canonical default).
    Front,
    /// Back face (dual-sided apparel only).
    Back,
}

impl View {
    /// The opposite face.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Static description of one product type.
#[derive(Debug, Clone)]
pub struct ProductSpec {
    /// Display name used in cart line items.
    pub display_name: &'static str,
    /// Base unit price in cents.
    pub base_price_cents: u32,
    /// Extra charge in cents when dual-sided printing is enabled.
    pub dual_sided_surcharge_cents: u32,
    /// Drawing surface width in pixels.
    pub surface_width: f32,
    /// Drawing surface height in pixels.
    pub surface_height: f32,
    /// Whether front and back can be designed independently.
    pub supports_dual_sided: bool,
    /// Size labels offered for this product.
    pub sizes: &'static [&'static str],
    /// Index into `sizes` of the default selection.
    pub default_size: usize,
    /// Views available for this product.
    pub views: &'static [View],
    /// Printable-area overlay bounds in screen coordinates at zoom 1.
    pub print_overlay: Rect,
}

impl ProductSpec {
    /// Mockup image path for the given view.
    ///
    /// Falls back to the front mockup for products without a distinct
    /// back image.
    #[must_use]
    pub fn mockup_path(&self, view: View) -> &'static str {
        match (self.display_name, view) {
            ("Classic T-Shirt", View::Back) => "mockups/tshirt-back.png",
            ("Classic T-Shirt", View::Front) => "mockups/tshirt-front.png",
            ("Ceramic Mug", _) => "mockups/mug.png",
            _ => "mockups/cap.png",
        }
    }

    /// Default size label.
    #[must_use]
    pub fn default_size_label(&self) -> &'static str {
        self.sizes[self.default_size]
    }
}

/// T-shirt: 500x600 apparel surface, dual-sided.
static TSHIRT: ProductSpec = ProductSpec {
    display_name: "Classic T-Shirt",
    base_price_cents: 1999,
    dual_sided_surcharge_cents: 700,
    surface_width: 500.0,
    surface_height: 600.0,
    supports_dual_sided: true,
    sizes: &["S", "M", "L", "XL"],
    default_size: 1,
    views: &[View::Front, View::Back],
    print_overlay: Rect {
        left: 140.0,
        top: 140.0,
        width: 220.0,
        height: 300.0,
    },
};

/// Mug: 400x400 surface, one view.
static MUG: ProductSpec = ProductSpec {
    display_name: "Ceramic Mug",
    base_price_cents: 1299,
    dual_sided_surcharge_cents: 0,
    surface_width: 400.0,
    surface_height: 400.0,
    supports_dual_sided: false,
    sizes: &["11oz", "15oz"],
    default_size: 0,
    views: &[View::Front],
    print_overlay: Rect {
        left: 110.0,
        top: 110.0,
        width: 180.0,
        height: 180.0,
    },
};

/// Cap: 450x350 surface, one view.
static CAP: ProductSpec = ProductSpec {
    display_name: "Baseball Cap",
    base_price_cents: 1599,
    dual_sided_surcharge_cents: 0,
    surface_width: 450.0,
    surface_height: 350.0,
    supports_dual_sided: false,
    sizes: &["One Size"],
    default_size: 0,
    views: &[View::Front],
    print_overlay: Rect {
        left: 150.0,
        top: 90.0,
        width: 150.0,
        height: 110.0,
    },
};
