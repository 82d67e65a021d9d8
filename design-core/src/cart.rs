//! Cart collaborator seam and the line item handed across it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finished design ready for the surrounding cart system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Synthetic line-item id.
    pub id: Uuid,
    /// Product display name.
    pub display_name: String,
    /// Unit price in cents, dual-sided surcharge included.
    pub unit_price_cents: u32,
    /// Exported design image as a base64 PNG data URI.
    pub image: String,
    /// Back-side image for dual-sided products.
    pub back_image: Option<String>,
    /// Selected size label.
    pub size: String,
    /// Side label: `"front"` or `"front+back"`.
    pub side_label: String,
}

/// Receives finished line items from the design session.
pub trait CartSink {
    /// Accept a line item. The engine treats this as infallible; cart
    /// persistence failures belong to the surrounding application.
    fn add(&mut self, item: CartLineItem);
}

/// In-memory cart for tests and embedding hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryCart {
    items: Vec<CartLineItem>,
}

impl MemoryCart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items handed off so far.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }
}

impl CartSink for MemoryCart {
    fn add(&mut self, item: CartLineItem) {
        self.items.push(item);
    }
}
