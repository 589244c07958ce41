//! # Line-Item Calculator
//!
//! Computes a single row's `subtotal` from its priced attributes.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Subtotal Calculation                            │
//! │                                                                         │
//! │  line_gross      = net_unit_price × quantity                            │
//! │  discount_amount = line_gross × discount / 100      (always percent)    │
//! │  tax_amount      = tax_type == fixed ? tax                              │
//! │                                      : line_gross × tax / 100           │
//! │                                                                         │
//! │  subtotal        = line_gross − discount_amount + tax_amount            │
//! │                                                                         │
//! │  quantity ≤ 0            → treated as 1                                 │
//! │  price/discount/tax NaN  → treated as 0                                 │
//! │  No rounding. No errors. No side effects.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits to one row never trigger recomputation of another; the order-level
//! aggregation lives in [`crate::totals`] and only reads each row's
//! already-computed `subtotal`.

use crate::numeric::finite_or;
use crate::types::{LineItem, TaxType};

/// Computes one line's subtotal from raw attributes.
///
/// ## Example
/// ```rust
/// use tally_core::line::line_subtotal;
/// use tally_core::TaxType;
///
/// // 2 × $100, 10% discount, 5% tax: 200 − 20 + 10
/// assert_eq!(line_subtotal(100.0, 2, 10.0, 5.0, TaxType::Percent), 190.0);
///
/// // Same line with a fixed $15 tax: 200 − 20 + 15
/// assert_eq!(line_subtotal(100.0, 2, 10.0, 15.0, TaxType::Fixed), 195.0);
/// ```
pub fn line_subtotal(
    net_unit_price: f64,
    quantity: i64,
    discount: f64,
    tax: f64,
    tax_type: TaxType,
) -> f64 {
    // Defensive clamps per the coercion contract: a half-filled row still
    // yields a renderable number.
    let quantity = if quantity <= 0 { 1 } else { quantity };
    let net_unit_price = finite_or(net_unit_price, 0.0);
    let discount = finite_or(discount, 0.0);
    let tax = finite_or(tax, 0.0);

    let line_gross = net_unit_price * quantity as f64;
    let discount_amount = line_gross * discount / 100.0;
    let tax_amount = match tax_type {
        TaxType::Fixed => tax,
        TaxType::Percent => line_gross * tax / 100.0,
    };

    line_gross - discount_amount + tax_amount
}

/// Computes the subtotal for an existing [`LineItem`], ignoring its cached
/// `subtotal` field.
#[inline]
pub fn compute_line_subtotal(item: &LineItem) -> f64 {
    line_subtotal(
        item.net_unit_price,
        item.quantity,
        item.discount,
        item.tax,
        item.tax_type,
    )
}

impl LineItem {
    /// The subtotal this row *should* carry given its current inputs.
    #[inline]
    pub fn computed_subtotal(&self) -> f64 {
        compute_line_subtotal(self)
    }

    /// Recomputes and writes back the cached `subtotal`.
    ///
    /// Callers normally go through the update hook in [`crate::selection`]
    /// rather than calling this directly.
    #[inline]
    pub fn recompute_subtotal(&mut self) {
        self.subtotal = self.computed_subtotal();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(price: f64, qty: i64, discount: f64, tax: f64, tax_type: TaxType) -> LineItem {
        let mut item = LineItem {
            id: "l1".to_string(),
            product_id: "p1".to_string(),
            variation_id: None,
            sku: "SKU-1".to_string(),
            name: "Widget".to_string(),
            quantity: qty,
            net_unit_price: price,
            discount,
            tax,
            tax_type,
            subtotal: 0.0,
            added_at: Utc::now(),
        };
        item.recompute_subtotal();
        item
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let first = line_subtotal(19.99, 3, 7.5, 4.25, TaxType::Percent);
        for _ in 0..10 {
            assert_eq!(line_subtotal(19.99, 3, 7.5, 4.25, TaxType::Percent), first);
        }
    }

    #[test]
    fn test_zero_quantity_treated_as_one() {
        assert_eq!(line_subtotal(10.0, 0, 0.0, 0.0, TaxType::Percent), 10.0);
        assert_eq!(line_subtotal(10.0, -3, 0.0, 0.0, TaxType::Percent), 10.0);
    }

    #[test]
    fn test_percent_discount_and_tax() {
        // gross 200, discount 20, tax 10
        assert_eq!(line_subtotal(100.0, 2, 10.0, 5.0, TaxType::Percent), 190.0);
    }

    #[test]
    fn test_fixed_tax_not_scaled_by_gross() {
        // gross 200, discount 20, tax 15 flat
        assert_eq!(line_subtotal(100.0, 2, 10.0, 15.0, TaxType::Fixed), 195.0);
    }

    #[test]
    fn test_non_finite_inputs_degrade_to_zero() {
        assert_eq!(line_subtotal(f64::NAN, 2, 0.0, 0.0, TaxType::Percent), 0.0);
        assert_eq!(
            line_subtotal(10.0, 1, f64::NAN, f64::INFINITY, TaxType::Percent),
            10.0
        );
    }

    #[test]
    fn test_over_100_discount_goes_negative_unclamped() {
        // 150% discount: 100 − 150 = −50. Deliberately unclamped
        // (credit-note semantics).
        assert_eq!(line_subtotal(100.0, 1, 150.0, 0.0, TaxType::Percent), -50.0);
    }

    #[test]
    fn test_fractional_result_is_not_rounded() {
        // gross 9.99, 5% tax = 0.4995; formatting is the UI's job
        let subtotal = line_subtotal(3.33, 3, 0.0, 5.0, TaxType::Percent);
        assert!((subtotal - 10.4895).abs() < 1e-12);
    }

    #[test]
    fn test_recompute_writes_back_cached_subtotal() {
        let mut item = line(100.0, 2, 10.0, 5.0, TaxType::Percent);
        assert_eq!(item.subtotal, 190.0);

        item.quantity = 3;
        item.recompute_subtotal();
        assert_eq!(item.subtotal, 285.0); // 300 − 30 + 15
        assert_eq!(item.subtotal, item.computed_subtotal());
    }
}
