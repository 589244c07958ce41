//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Philosophy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Where Errors Live                               │
//! │                                                                         │
//! │  Calculators (line, totals)      NEVER error - malformed numeric        │
//! │                                  input coerces to 0 (or 1 for qty)      │
//! │                                                                         │
//! │  Selection (add/update/delete)   CoreError - duplicate guard, unknown   │
//! │                                  ids; surfaced as user warnings         │
//! │                                                                         │
//! │  Validation (pre-submission)     ValidationError - required fields,     │
//! │                                  range checks, run by the forms         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → form warning → user                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, limits, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Selection-layer errors.
///
/// These are user-facing warnings, not failures: the collection is always
/// left untouched when one is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id was not found in the injected catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variation id was not found on the product.
    #[error("Variation {variation_id} not found on product {product_id}")]
    VariationNotFound {
        product_id: String,
        variation_id: String,
    },

    /// A row for this product (and variation, when given) already exists.
    ///
    /// ## When This Occurs
    /// The user picked a product that is already in the document. The forms
    /// surface this as a warning toast and the add is simply skipped -
    /// quantity edits happen on the existing row instead.
    #[error("Product {product_id} is already in the order")]
    DuplicateLine {
        product_id: String,
        variation_id: Option<String>,
    },

    /// The document has reached its line cap.
    #[error("Order cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Pre-submission validation errors.
///
/// Run by the enclosing forms before posting to the backend; the calculators
/// themselves never produce these.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// Quantity is outside the accepted range.
    #[error("Quantity {requested} is out of range (1..={max})")]
    QuantityOutOfRange { requested: i64, max: i64 },

    /// The document has no line items.
    #[error("Order must contain at least one line item")]
    NoItems,

    /// The document exceeds the line cap.
    #[error("Order cannot have more than {max} lines")]
    TooManyItems { max: usize },
}

// =============================================================================
// Unit Tests
// =============================================================================
