//! # Order Aggregator
//!
//! Computes document-level totals from the line collection plus the
//! order-level adjustments.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Totals Calculation                            │
//! │                                                                         │
//! │  items[].subtotal ──► items_total = Σ subtotal                          │
//! │                              │                                          │
//! │  order_tax ──────────────────┼──► percent? items_total × v / 100        │
//! │   (string|number|null)       │    fixed?   v                            │
//! │                              │                                          │
//! │  order_discount ─────────────┼──► percent? items_total × v / 100        │
//! │   (string|number|null)       │    fixed?   v                            │
//! │                              │                                          │
//! │  shipping ───────────────────┤    always a fixed amount                 │
//! │                              ▼                                          │
//! │  grand_total = items_total − discount + tax + shipping                  │
//! │                                                                         │
//! │  Nothing is clamped: a discount larger than the document legitimately   │
//! │  produces a negative grand total (credit note).                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregator only reads each row's already-computed `subtotal`; it never
//! re-runs the line calculator. The enclosing form re-invokes it on every
//! relevant state change, so the latest inputs always determine the latest
//! output - there is no cached or stale state here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::numeric::{finite_or, AmountInput};
use crate::types::LineItem;

// =============================================================================
// Order Adjustments
// =============================================================================

fn default_true() -> bool {
    true
}

/// Document-level adjustment parameters, as captured by the form.
///
/// ## Defaults
/// Order tax defaults to *percent* mode, order discount to *fixed* mode -
/// an asymmetry preserved from the forms' observed behavior. Do not "fix" it
/// without product confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderAdjustments {
    /// Order-level tax as entered (number, string, or blank).
    #[serde(default)]
    pub order_tax: AmountInput,

    /// When true (the default), `order_tax` is a percentage of the items
    /// total; otherwise a fixed amount.
    #[serde(default = "default_true")]
    pub order_tax_is_percentage: bool,

    /// Order-level discount as entered (number, string, or blank).
    #[serde(default)]
    pub order_discount: AmountInput,

    /// When true, `order_discount` is a percentage of the items total;
    /// defaults to false (fixed amount).
    #[serde(default)]
    pub order_discount_is_percentage: bool,

    /// Shipping cost, always a fixed amount added unconditionally.
    #[serde(default)]
    pub shipping: AmountInput,
}

/// Hand-written so the in-memory default matches the serde field defaults
/// (tax in percent mode, discount in fixed mode).
impl Default for OrderAdjustments {
    fn default() -> Self {
        OrderAdjustments {
            order_tax: AmountInput::Missing,
            order_tax_is_percentage: true,
            order_discount: AmountInput::Missing,
            order_discount_is_percentage: false,
            shipping: AmountInput::Missing,
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The aggregator's output: everything the totals footer displays.
///
/// Raw `f64` values - currency formatting is presentation's job. This is a
/// derived read model, never the system of record; the backend is
/// authoritative once the document is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of all line subtotals.
    pub items_total: f64,

    /// Resolved order-level tax amount.
    pub order_tax_amount: f64,

    /// Resolved order-level discount amount.
    pub order_discount: f64,

    /// Resolved shipping amount.
    pub shipping: f64,

    /// `items_total − order_discount + order_tax_amount + shipping`.
    pub grand_total: f64,
}

/// Computes the document totals.
///
/// Pure and idempotent: identical inputs yield bit-identical output. Never
/// panics - malformed adjustment values coerce to 0, an empty item slice
/// yields an items total of 0.
///
/// ## Example
/// ```rust
/// use tally_core::totals::{compute_order_totals, OrderAdjustments};
///
/// let adjustments = OrderAdjustments {
///     order_tax: "10".into(),      // percent (default mode)
///     order_discount: "50".into(), // fixed (default mode)
///     shipping: "20".into(),
///     ..Default::default()
/// };
///
/// // No items yet: 0 − 50 + 0 + 20
/// let totals = compute_order_totals(&[], &adjustments);
/// assert_eq!(totals.grand_total, -30.0);
/// ```
pub fn compute_order_totals(items: &[LineItem], adjustments: &OrderAdjustments) -> OrderTotals {
    // A row whose subtotal was never computed contributes nothing.
    let items_total: f64 = items.iter().map(|i| finite_or(i.subtotal, 0.0)).sum();

    let tax_value = adjustments.order_tax.resolve(0.0);
    let order_tax_amount = if adjustments.order_tax_is_percentage {
        items_total * tax_value / 100.0
    } else {
        tax_value
    };

    let discount_value = adjustments.order_discount.resolve(0.0);
    let order_discount = if adjustments.order_discount_is_percentage {
        items_total * discount_value / 100.0
    } else {
        discount_value
    };

    let shipping = adjustments.shipping.resolve(0.0);

    OrderTotals {
        items_total,
        order_tax_amount,
        order_discount,
        shipping,
        grand_total: items_total - order_discount + order_tax_amount + shipping,
    }
}

// =============================================================================
// Submission Payload
// =============================================================================

/// Snake-case view of [`OrderTotals`] matching the backend's create/update
/// request fields. The engine never performs the HTTP call; calling code
/// embeds this in the payload it posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotalsPayload {
    pub items_total: f64,
    pub order_tax: f64,
    pub order_discount: f64,
    pub shipping: f64,
    pub grand_total: f64,
}

impl From<&OrderTotals> for OrderTotalsPayload {
    fn from(totals: &OrderTotals) -> Self {
        OrderTotalsPayload {
            items_total: totals.items_total,
            order_tax: totals.order_tax_amount,
            order_discount: totals.order_discount,
            shipping: totals.shipping,
            grand_total: totals.grand_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxType;
    use chrono::Utc;

    fn item_with_subtotal(id: &str, subtotal: f64) -> LineItem {
        LineItem {
            id: id.to_string(),
            product_id: format!("p-{id}"),
            variation_id: None,
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
            quantity: 1,
            net_unit_price: subtotal,
            discount: 0.0,
            tax: 0.0,
            tax_type: TaxType::Percent,
            subtotal,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_items_negative_grand_total_allowed() {
        let adjustments = OrderAdjustments {
            order_tax: 10.0.into(),
            order_discount: 5.0.into(),
            shipping: 2.0.into(),
            ..Default::default()
        };

        let totals = compute_order_totals(&[], &adjustments);
        assert_eq!(totals.items_total, 0.0);
        assert_eq!(totals.order_tax_amount, 0.0); // 10% of nothing
        assert_eq!(totals.order_discount, 5.0); // fixed by default
        assert_eq!(totals.shipping, 2.0);
        assert_eq!(totals.grand_total, -3.0); // unclamped
    }

    #[test]
    fn test_string_adjustments_percentage_tax() {
        let items = vec![item_with_subtotal("1", 100.0), item_with_subtotal("2", 200.0)];
        let adjustments = OrderAdjustments {
            order_tax: "10".into(),
            order_discount: "50".into(),
            shipping: "20".into(),
            ..Default::default()
        };

        let totals = compute_order_totals(&items, &adjustments);
        assert_eq!(totals.items_total, 300.0);
        assert_eq!(totals.order_tax_amount, 30.0);
        assert_eq!(totals.order_discount, 50.0);
        assert_eq!(totals.shipping, 20.0);
        assert_eq!(totals.grand_total, 300.0);
    }

    #[test]
    fn test_percentage_discount_mode() {
        let items = vec![item_with_subtotal("1", 200.0)];
        let adjustments = OrderAdjustments {
            order_discount: 25.0.into(),
            order_discount_is_percentage: true,
            ..Default::default()
        };

        let totals = compute_order_totals(&items, &adjustments);
        assert_eq!(totals.order_discount, 50.0);
        assert_eq!(totals.grand_total, 150.0);
    }

    #[test]
    fn test_fixed_tax_mode() {
        let items = vec![item_with_subtotal("1", 200.0)];
        let adjustments = OrderAdjustments {
            order_tax: 12.5.into(),
            order_tax_is_percentage: false,
            ..Default::default()
        };

        let totals = compute_order_totals(&items, &adjustments);
        assert_eq!(totals.order_tax_amount, 12.5);
        assert_eq!(totals.grand_total, 212.5);
    }

    #[test]
    fn test_garbage_string_coerces_to_zero_without_panicking() {
        let items = vec![item_with_subtotal("1", 100.0)];
        let adjustments = OrderAdjustments {
            order_tax: "abc".into(),
            ..Default::default()
        };

        let totals = compute_order_totals(&items, &adjustments);
        assert_eq!(totals.order_tax_amount, 0.0);
        assert_eq!(totals.grand_total, 100.0);
    }

    #[test]
    fn test_non_finite_subtotal_contributes_nothing() {
        let mut broken = item_with_subtotal("1", 100.0);
        broken.subtotal = f64::NAN;
        let items = vec![broken, item_with_subtotal("2", 50.0)];

        let totals = compute_order_totals(&items, &OrderAdjustments::default());
        assert_eq!(totals.items_total, 50.0);
    }

    #[test]
    fn test_idempotent_recomputation() {
        let items = vec![item_with_subtotal("1", 123.45)];
        let adjustments = OrderAdjustments {
            order_tax: "7.5".into(),
            shipping: 9.99.into(),
            ..Default::default()
        };

        let first = compute_order_totals(&items, &adjustments);
        let second = compute_order_totals(&items, &adjustments);
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_sums_match_items_total() {
        // Subtotals computed independently by the line calculator must equal
        // the aggregator's items_total for the same rows.
        let mut items = vec![
            item_with_subtotal("1", 0.0),
            item_with_subtotal("2", 0.0),
            item_with_subtotal("3", 0.0),
        ];
        let inputs = [(19.99, 2, 5.0, 8.25), (3.5, 7, 0.0, 0.0), (120.0, 1, 12.0, 4.0)];
        for (item, (price, qty, discount, tax)) in items.iter_mut().zip(inputs) {
            item.net_unit_price = price;
            item.quantity = qty;
            item.discount = discount;
            item.tax = tax;
            item.recompute_subtotal();
        }

        let independent_sum: f64 = items.iter().map(|i| i.computed_subtotal()).sum();
        let totals = compute_order_totals(&items, &OrderAdjustments::default());
        assert_eq!(totals.items_total, independent_sum);
        assert_eq!(totals.grand_total, independent_sum);
    }

    #[test]
    fn test_payload_field_mapping() {
        let totals = OrderTotals {
            items_total: 300.0,
            order_tax_amount: 30.0,
            order_discount: 50.0,
            shipping: 20.0,
            grand_total: 300.0,
        };

        let payload = OrderTotalsPayload::from(&totals);
        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["order_tax"], 30.0);
        assert_eq!(json["order_discount"], 50.0);
        assert_eq!(json["grand_total"], 300.0);
    }
}
