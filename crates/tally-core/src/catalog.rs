//! # Product Catalog
//!
//! A read-only repository seam between the selection layer and whatever
//! actually stores products (Redux-style store slice, HTTP cache, database -
//! all external). The calculators only ever need `find_by_id`, so that is
//! the whole trait.

use crate::types::Product;

/// Read-only product lookup injected into [`crate::selection::OrderLines`].
pub trait ProductCatalog {
    /// Finds a product by its opaque id.
    fn find_by_id(&self, id: &str) -> Option<&Product>;
}

/// The shipped catalog implementation: a plain in-memory slice, as hydrated
/// from wherever the host application fetched its products.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Wraps an already-fetched product list.
    pub fn new(products: Vec<Product>) -> Self {
        InMemoryCatalog { products }
    }

    /// All products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
