//! # Line Selection
//!
//! Maintains the line-item collection as products are picked, preventing
//! duplicate rows for the same product (and, where variations apply, the same
//! product+variation pair).
//!
//! ## Selection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Collection Operations                           │
//! │                                                                         │
//! │  Form Action              Operation                Collection Change    │
//! │  ───────────              ─────────                ─────────────────    │
//! │                                                                         │
//! │  Pick Product ──────────► add_product() ─────────► items.push(mapped)   │
//! │                              │                                          │
//! │                              ├─ unknown id ──────► ProductNotFound      │
//! │                              └─ already present ─► DuplicateLine        │
//! │                                 (collection untouched, mapper skipped)  │
//! │                                                                         │
//! │  Edit Field ────────────► update_item() ─────────► edit + hook patch    │
//! │                                                                         │
//! │  Click Remove ──────────► delete_item() ─────────► items.retain(...)    │
//! │                                                                         │
//! │  Reset Form ────────────► clear() ───────────────► items.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The collection is owned exclusively by the enclosing form; everything here
//! is synchronous and single-threaded. The duplicate guard is a user-facing
//! warning, not a failure: existing state is left untouched.

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::ProductCatalog;
use crate::error::CoreError;
use crate::line::compute_line_subtotal;
use crate::types::{LineItem, Product, TaxType, Variation};
use crate::MAX_ORDER_LINES;

// =============================================================================
// Strategy Seams
// =============================================================================

/// Builds a new [`LineItem`] from a picked product.
///
/// Forms differ in how they seed rows (a purchase form seeds cost price, a
/// sale form seeds retail price); each supplies its own mapper. The id is
/// generated by the collection and handed in.
pub trait ItemMapper {
    fn map_product_to_item(
        &self,
        product: &Product,
        variation: Option<&Variation>,
        id: String,
    ) -> LineItem;
}

/// Produces a partial patch to merge on top of a just-edited row.
///
/// This is how subtotal recomputation is wired into collection mutation: the
/// default hook ([`SubtotalRecompute`]) returns a patch carrying the freshly
/// computed subtotal. The Order Aggregator is never invoked here.
pub trait ItemUpdateHook {
    fn recompute_on_field_change(&self, item: &LineItem, edit: &LineItemEdit) -> LineItemPatch;
}

/// A single-field edit to a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemEdit {
    Quantity(i64),
    NetUnitPrice(f64),
    Discount(f64),
    Tax(f64),
    TaxType(TaxType),
}

/// A partial row update returned by an [`ItemUpdateHook`]; `None` fields are
/// left as-is when merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemPatch {
    pub quantity: Option<i64>,
    pub subtotal: Option<f64>,
}

impl LineItem {
    fn apply_edit(&mut self, edit: &LineItemEdit) {
        match edit {
            LineItemEdit::Quantity(qty) => self.quantity = *qty,
            LineItemEdit::NetUnitPrice(price) => self.net_unit_price = *price,
            LineItemEdit::Discount(discount) => self.discount = *discount,
            LineItemEdit::Tax(tax) => self.tax = *tax,
            LineItemEdit::TaxType(tax_type) => self.tax_type = *tax_type,
        }
    }

    fn apply_patch(&mut self, patch: LineItemPatch) {
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(subtotal) = patch.subtotal {
            self.subtotal = subtotal;
        }
    }
}

// =============================================================================
// Default Strategies
// =============================================================================

/// The stock mapper: quantity 1, price/discount/tax seeded from the product
/// (or the selected variation's price), subtotal computed immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultItemMapper;

impl ItemMapper for DefaultItemMapper {
    fn map_product_to_item(
        &self,
        product: &Product,
        variation: Option<&Variation>,
        id: String,
    ) -> LineItem {
        let mut item = LineItem {
            id,
            product_id: product.id.clone(),
            variation_id: variation.map(|v| v.id.clone()),
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity: 1,
            net_unit_price: variation.map_or(product.price, |v| v.price),
            discount: product.discount,
            tax: product.tax,
            tax_type: product.tax_type,
            subtotal: 0.0,
            added_at: Utc::now(),
        };
        item.recompute_subtotal();
        item
    }
}

/// The stock update hook: recomputes the row's subtotal after every edit,
/// keeping the cached field honest.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtotalRecompute;

impl ItemUpdateHook for SubtotalRecompute {
    fn recompute_on_field_change(&self, item: &LineItem, _edit: &LineItemEdit) -> LineItemPatch {
        LineItemPatch {
            subtotal: Some(compute_line_subtotal(item)),
            ..LineItemPatch::default()
        }
    }
}

// =============================================================================
// Order Lines
// =============================================================================

/// Generates a session-unique row id.
///
/// Practically unique within one editing session is all the forms need;
/// the backend assigns persistent ids on submission.
fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

/// The line-item collection behind one document form.
#[derive(Debug, Clone, Default)]
pub struct OrderLines {
    items: Vec<LineItem>,
}

impl OrderLines {
    /// Creates an empty collection.
    pub fn new() -> Self {
        OrderLines { items: Vec::new() }
    }

    /// Adds a product (optionally a specific variation) as a new row.
    ///
    /// ## Behavior
    /// - Unknown product (or variation) id: [`CoreError::ProductNotFound`] /
    ///   [`CoreError::VariationNotFound`]
    /// - A row with the same product+variation already present:
    ///   [`CoreError::DuplicateLine`] - the collection is untouched and the
    ///   mapper is never invoked
    /// - Otherwise the mapped row is appended and a reference returned
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::catalog::InMemoryCatalog;
    /// use tally_core::selection::{DefaultItemMapper, OrderLines};
    /// use tally_core::types::{Product, TaxType};
    ///
    /// let catalog = InMemoryCatalog::new(vec![Product {
    ///     id: "p1".into(),
    ///     sku: "SKU-1".into(),
    ///     name: "Widget".into(),
    ///     price: 10.0,
    ///     tax: 0.0,
    ///     tax_type: TaxType::Percent,
    ///     discount: 0.0,
    ///     variations: vec![],
    /// }]);
    ///
    /// let mut lines = OrderLines::new();
    /// let row = lines.add_product(&catalog, "p1", None, &DefaultItemMapper).unwrap();
    /// assert_eq!(row.quantity, 1);
    /// assert_eq!(row.subtotal, 10.0);
    ///
    /// // Picking the same product again is rejected, not duplicated
    /// assert!(lines.add_product(&catalog, "p1", None, &DefaultItemMapper).is_err());
    /// assert_eq!(lines.len(), 1);
    /// ```
    pub fn add_product<C, M>(
        &mut self,
        catalog: &C,
        product_id: &str,
        variation_id: Option<&str>,
        mapper: &M,
    ) -> Result<&LineItem, CoreError>
    where
        C: ProductCatalog,
        M: ItemMapper,
    {
        let product = catalog
            .find_by_id(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let variation = match variation_id {
            Some(vid) => Some(product.variation(vid).ok_or_else(|| {
                CoreError::VariationNotFound {
                    product_id: product_id.to_string(),
                    variation_id: vid.to_string(),
                }
            })?),
            None => None,
        };

        let duplicate = self.items.iter().any(|item| {
            item.product_id == product_id && item.variation_id.as_deref() == variation_id
        });
        if duplicate {
            return Err(CoreError::DuplicateLine {
                product_id: product_id.to_string(),
                variation_id: variation_id.map(str::to_string),
            });
        }

        if self.items.len() >= MAX_ORDER_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_ORDER_LINES,
            });
        }

        let item = mapper.map_product_to_item(product, variation, new_line_id());
        self.items.push(item);
        Ok(self.items.last().expect("row was just pushed"))
    }

    /// Applies a single-field edit to the row matching `id`, then merges the
    /// hook's patch on top.
    ///
    /// Returns the updated row, or `None` when no row matches (no-op).
    pub fn update_item<H: ItemUpdateHook>(
        &mut self,
        id: &str,
        edit: LineItemEdit,
        hook: &H,
    ) -> Option<&LineItem> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.apply_edit(&edit);
        let patch = hook.recompute_on_field_change(item, &edit);
        item.apply_patch(patch);
        Some(item)
    }

    /// Removes the row matching `id`. Returns `false` (no-op) when absent.
    pub fn delete_item(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != initial_len
    }

    /// Empties the collection.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The current rows, in insertion order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Finds a row by id.
    pub fn find(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no rows exist.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
