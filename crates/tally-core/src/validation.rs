//! # Validation Module
//!
//! Caller-side checks the forms run before allowing submission. The
//! calculators deliberately never reject input (see [`crate::numeric`]);
//! these helpers exist so the forms can block obviously unsubmittable
//! documents with typed, user-presentable errors. Authoritative validation
//! still happens server-side.

use crate::error::ValidationError;
use crate::types::{DocumentKind, LineItem};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line quantity as entered in the table.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1500).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::QuantityOutOfRange {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates that the document has a sane number of lines.
pub fn validate_line_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::NoItems);
    }
    if count > MAX_ORDER_LINES {
        return Err(ValidationError::TooManyItems {
            max: MAX_ORDER_LINES,
        });
    }
    Ok(())
}

/// Validates the counterparty field a document kind requires.
///
/// Sales and quotations need a customer, purchases and returns a supplier,
/// adjustments and transfers neither.
pub fn validate_counterparty(kind: DocumentKind, party: Option<&str>) -> ValidationResult<()> {
    let Some(field) = kind.required_counterparty() else {
        return Ok(());
    };

    match party {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Composite check a form runs right before posting.
///
/// ## Example
/// ```rust
/// use tally_core::types::DocumentKind;
/// use tally_core::validation::validate_submittable;
///
/// // An empty sale with no customer is not submittable
/// assert!(validate_submittable(DocumentKind::Sale, None, &[]).is_err());
/// ```
pub fn validate_submittable(
    kind: DocumentKind,
    party: Option<&str>,
    items: &[LineItem],
) -> ValidationResult<()> {
    validate_counterparty(kind, party)?;
    validate_line_count(items.len())?;
    for item in items {
        validate_quantity(item.quantity)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxType;
    use chrono::Utc;

    fn item(quantity: i64) -> LineItem {
        LineItem {
            id: "l1".to_string(),
            product_id: "p1".to_string(),
            variation_id: None,
            sku: "SKU-1".to_string(),
            name: "Widget".to_string(),
            quantity,
            net_unit_price: 10.0,
            discount: 0.0,
            tax: 0.0,
            tax_type: TaxType::Percent,
            subtotal: 10.0,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_line_count_bounds() {
        assert!(validate_line_count(0).is_err());
        assert!(validate_line_count(1).is_ok());
        assert!(validate_line_count(MAX_ORDER_LINES).is_ok());
        assert!(validate_line_count(MAX_ORDER_LINES + 1).is_err());
    }

    #[test]
    fn test_counterparty_by_kind() {
        assert!(validate_counterparty(DocumentKind::Sale, Some("cust-1")).is_ok());
        assert!(validate_counterparty(DocumentKind::Sale, None).is_err());
        assert!(validate_counterparty(DocumentKind::Sale, Some("  ")).is_err());
        assert!(validate_counterparty(DocumentKind::Purchase, None).is_err());
        assert!(validate_counterparty(DocumentKind::Adjustment, None).is_ok());
    }

    #[test]
    fn test_submittable_composite() {
        let items = vec![item(2)];
        assert!(validate_submittable(DocumentKind::Sale, Some("cust-1"), &items).is_ok());
        assert!(validate_submittable(DocumentKind::Sale, Some("cust-1"), &[]).is_err());

        let bad_qty = vec![item(0)];
        assert!(validate_submittable(DocumentKind::Sale, Some("cust-1"), &bad_qty).is_err());
    }
}
