//! # tally-core: Pure Order Calculation Engine
//!
//! This crate is the **heart** of Tally. Every monetary figure the dashboard
//! shows (sales, quotations, purchases, adjustments, returns) is produced by
//! the pure functions in this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard Forms (external)                      │   │
//! │  │   Sale Form ──► Quotation Form ──► Purchase Form ──► ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process API                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  numeric  │  │   line    │  │  totals   │  │ selection │   │   │
//! │  │   │ coercion  │  │ Line-Item │  │   Order   │  │ dup guard │   │   │
//! │  │   │  helpers  │  │Calculator │  │Aggregator │  │  mutation │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Backend REST API (external collaborator)             │   │
//! │  │     receives order_tax / order_discount / grand_total fields    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`numeric`] - Decimal coercion helpers ([`AmountInput`], parse-or-default)
//! - [`types`] - Domain types (Product, LineItem, TaxType, DocumentKind)
//! - [`line`] - Line-Item Calculator (one row's subtotal)
//! - [`totals`] - Order Aggregator (document-level totals)
//! - [`selection`] - Line collection with duplicate guard and edit hooks
//! - [`catalog`] - Read-only product catalog trait
//! - [`validation`] - Caller-side pre-submission checks
//! - [`error`] - Typed domain errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculator is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Coerce, Don't Throw**: malformed numeric input degrades to 0 (or 1 for
//!    quantity) so the UI always has a renderable total; strict validation is
//!    the backend's job at submission time
//! 4. **No Rounding**: totals are raw `f64`; currency formatting is applied by
//!    presentation code, never here
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::line::line_subtotal;
//! use tally_core::totals::{compute_order_totals, OrderAdjustments};
//! use tally_core::TaxType;
//!
//! // One row: 2 × $100, 10% line discount, 5% line tax
//! let subtotal = line_subtotal(100.0, 2, 10.0, 5.0, TaxType::Percent);
//! assert_eq!(subtotal, 190.0);
//!
//! // Document-level: no adjustments, totals reduce to the items sum
//! let totals = compute_order_totals(&[], &OrderAdjustments::default());
//! assert_eq!(totals.grand_total, 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod line;
pub mod numeric;
pub mod selection;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::LineItem` instead of
// `use tally_core::types::LineItem`

pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use error::{CoreError, ValidationError};
pub use line::{compute_line_subtotal, line_subtotal};
pub use numeric::AmountInput;
pub use selection::{
    DefaultItemMapper, ItemMapper, ItemUpdateHook, LineItemEdit, LineItemPatch, OrderLines,
    SubtotalRecompute,
};
pub use totals::{compute_order_totals, OrderAdjustments, OrderTotals, OrderTotalsPayload};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single document.
///
/// ## Business Reason
/// Prevents runaway orders and keeps document sizes reasonable.
/// Can be made configurable per-tenant in future versions.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-tenant in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;
