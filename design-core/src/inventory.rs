//! Inventory collaborator seam.
//!
//! The engine only reads stock to gate add-to-cart and requests a
//! single-unit decrement after a successful hand-off. The authoritative
//! write happens in the external order-placement system; the gap
//! between the advisory read and the decrement is an accepted race. A
//! transactional provider can refuse the decrement by returning
//! `false`.

use std::collections::HashMap;

use crate::product::ProductType;

/// Read/decrement access to per-size stock counts.
pub trait InventoryProvider {
    /// Size label to available quantity for a product type.
    fn stock_for(&self, product: ProductType) -> HashMap<String, u32>;

    /// Request a stock decrement. Returns `false` if the provider
    /// refuses (unknown size, insufficient stock).
    fn decrement(&mut self, product: ProductType, size: &str, delta: u32) -> bool;
}

/// In-memory inventory for tests and embedding hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    stock: HashMap<ProductType, HashMap<String, u32>>,
}

impl MemoryInventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stock count for a product/size.
    pub fn set_stock(&mut self, product: ProductType, size: &str, quantity: u32) {
        self.stock
            .entry(product)
            .or_default()
            .insert(size.to_string(), quantity);
    }

    /// Current quantity for a product/size, zero when unknown.
    #[must_use]
    pub fn quantity(&self, product: ProductType, size: &str) -> u32 {
        self.stock
            .get(&product)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(0)
    }
}

impl InventoryProvider for MemoryInventory {
    fn stock_for(&self, product: ProductType) -> HashMap<String, u32> {
        self.stock.get(&product).cloned().unwrap_or_default()
    }

    fn decrement(&mut self, product: ProductType, size: &str, delta: u32) -> bool {
        match self
            .stock
            .get_mut(&product)
            .and_then(|sizes| sizes.get_mut(size))
        {
            Some(quantity) if *quantity >= delta => {
                *quantity -= delta;
                true
            }
            _ => false,
        }
    }
}
