//! # Domain Types
//!
//! Core domain types shared by the calculators and the dashboard forms.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │    LineItem     │   │    TaxType      │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (opaque)    │   │  id (session)   │   │  Percent        │        │
//! │  │  sku, name      │   │  product_id     │   │  Fixed          │        │
//! │  │  price, tax     │   │  qty, price     │   └─────────────────┘        │
//! │  │  variations[]   │   │  subtotal ◄─ derived, never hand-set │         │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │  DocumentKind   │  The six order-like documents sharing this         │
//! │  │  Sale/Quote/... │  calculation model.                                │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` freezes the product's sku/name/price at add time. If the
//! catalog entry changes afterwards, existing rows keep displaying the values
//! the user actually agreed to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Tax Type
// =============================================================================

/// How a tax value is interpreted.
///
/// ## Note on Asymmetry
/// Line-level *discount* is always a percentage of the line gross; only tax
/// carries this mode at the line level. Order-level tax AND discount each
/// carry their own percent/fixed flag (see [`crate::totals::OrderAdjustments`]).
/// This asymmetry is intentional and mirrors how the forms behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// Value is a percentage of the line gross.
    Percent,
    /// Value is an absolute currency amount.
    Fixed,
}

impl Default for TaxType {
    fn default() -> Self {
        TaxType::Percent
    }
}

// =============================================================================
// Product & Variation
// =============================================================================

/// A product variation (size, color, ...) with its own price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    /// Opaque identifier, unique within the parent product.
    pub id: String,

    /// Display name ("Large", "Red", ...).
    pub name: String,

    /// Unit price for this variation, overriding the product price.
    pub price: f64,
}

/// A catalog product as the selection layer sees it.
///
/// Carries the seed values a freshly added line starts from. The engine never
/// validates product ids - the catalog (external system of record) does.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier.
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown in the line table.
    pub name: String,

    /// Default unit price (overridden by a selected variation).
    pub price: f64,

    /// Default tax seeded onto new lines.
    #[serde(default)]
    pub tax: f64,

    /// How the default tax is interpreted.
    #[serde(default)]
    pub tax_type: TaxType,

    /// Default line discount (percent) seeded onto new lines.
    #[serde(default)]
    pub discount: f64,

    /// Variations, empty for simple products.
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl Product {
    /// Looks up a variation by id.
    pub fn variation(&self, variation_id: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == variation_id)
    }

    /// Whether this product requires a variation choice before it can be
    /// added to an order.
    #[inline]
    pub fn has_variations(&self) -> bool {
        !self.variations.is_empty()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of an order-like document.
///
/// ## Invariant
/// `subtotal` is a pure function of `quantity`, `net_unit_price`, `discount`,
/// `tax` and `tax_type`; it is written back by the recompute hook on every
/// edit (see [`crate::selection`]) and must never drift from what
/// [`crate::line::line_subtotal`] would produce.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Session-unique row identifier, assigned at add time.
    pub id: String,

    /// Reference to the selected product (opaque, not validated here).
    pub product_id: String,

    /// Selected variation, when the product has them. Part of the
    /// duplicate-guard key.
    #[serde(default)]
    pub variation_id: Option<String>,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Quantity; callers keep it >= 1, the calculator treats <= 0 as 1.
    pub quantity: i64,

    /// Per-unit price before discount and tax.
    pub net_unit_price: f64,

    /// Line discount - always a percentage of the line gross.
    pub discount: f64,

    /// Line tax - percent or fixed depending on `tax_type`.
    pub tax: f64,

    /// How `tax` is interpreted.
    pub tax_type: TaxType,

    /// Derived: this line's contribution to the document total.
    pub subtotal: f64,

    /// When this row was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Document Kind
// =============================================================================

/// The order-like documents that share this calculation model.
///
/// Used by [`crate::validation`] to decide which counterparty a form must
/// capture before submission (a sale needs a customer, a purchase a supplier,
/// an adjustment neither).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Sale,
    Quotation,
    Purchase,
    Adjustment,
    Return,
    Transfer,
}

impl DocumentKind {
    /// The counterparty field this document requires, if any.
    pub fn required_counterparty(&self) -> Option<&'static str> {
        match self {
            DocumentKind::Sale | DocumentKind::Quotation => Some("customer"),
            DocumentKind::Purchase | DocumentKind::Return => Some("supplier"),
            DocumentKind::Adjustment | DocumentKind::Transfer => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
