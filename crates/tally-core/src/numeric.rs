//! # Numeric Coercion
//!
//! The dashboard forms submit order-level adjustments as whatever the input
//! widget happened to hold: a number, a string (possibly empty or garbage),
//! or nothing at all. The calculators must never fail on that input.
//!
//! ## The Coercion Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INPUT                        RESOLVES TO                               │
//! │  ───────────────────────────  ─────────────────────────────────────     │
//! │  12.5          (number)       12.5                                      │
//! │  "12.5"        (string)       12.5                                      │
//! │  ""  /  "  "   (string)       default                                   │
//! │  "abc"         (string)       default                                   │
//! │  NaN / ±inf    (number)       default                                   │
//! │  null / absent                default                                   │
//! │                                                                         │
//! │  Nothing in this module ever panics or returns NaN.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The zero-fallback is deliberate: a half-filled form should still render a
//! total. Authoritative validation happens server-side at submission time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Free Helpers
// =============================================================================

/// Parses a decimal string, returning `default` for anything unparseable.
///
/// ## Behavior
/// - Leading/trailing whitespace is ignored
/// - Empty (or all-whitespace) input returns `default`
/// - `"NaN"`, `"inf"` and friends parse but are rejected as non-finite
///
/// ## Example
/// ```rust
/// use tally_core::numeric::parse_decimal_or_default;
///
/// assert_eq!(parse_decimal_or_default("12.5", 0.0), 12.5);
/// assert_eq!(parse_decimal_or_default("", 0.0), 0.0);
/// assert_eq!(parse_decimal_or_default("abc", 0.0), 0.0);
/// assert_eq!(parse_decimal_or_default(" 7 ", 0.0), 7.0);
/// ```
pub fn parse_decimal_or_default(input: &str, default: f64) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => default,
    }
}

/// Passes finite values through, replacing NaN and ±infinity with `default`.
#[inline]
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

// =============================================================================
// AmountInput
// =============================================================================

/// A loosely-typed monetary input as submitted by a form field.
///
/// Deserializes from a JSON number, a JSON string, or null - the three shapes
/// the dashboard actually sends for `order_tax`, `order_discount` and
/// `shipping`. Call [`AmountInput::resolve`] to obtain a usable `f64`.
///
/// ## Example
/// ```rust
/// use tally_core::numeric::AmountInput;
///
/// let from_widget: AmountInput = serde_json::from_str("\"12.5\"").unwrap();
/// assert_eq!(from_widget.resolve(0.0), 12.5);
///
/// let untouched: AmountInput = serde_json::from_str("null").unwrap();
/// assert_eq!(untouched.resolve(0.0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum AmountInput {
    /// A numeric field value.
    Number(f64),
    /// A free-text field value, parsed lazily.
    Text(String),
    /// The field was left blank or never sent.
    Missing,
}

impl AmountInput {
    /// Resolves the input to a finite `f64`, applying the coercion contract.
    pub fn resolve(&self, default: f64) -> f64 {
        match self {
            AmountInput::Number(n) => finite_or(*n, default),
            AmountInput::Text(s) => parse_decimal_or_default(s, default),
            AmountInput::Missing => default,
        }
    }

    /// True when the field carried no value at all.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, AmountInput::Missing)
    }
}

impl Default for AmountInput {
    fn default() -> Self {
        AmountInput::Missing
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Number(value as f64)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<Option<f64>> for AmountInput {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => AmountInput::Number(v),
            None => AmountInput::Missing,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(parse_decimal_or_default("12.5", 0.0), 12.5);
        assert_eq!(parse_decimal_or_default("-3", 0.0), -3.0);
        assert_eq!(parse_decimal_or_default("0", 9.0), 0.0);
    }

    #[test]
    fn test_parse_garbage_returns_default() {
        assert_eq!(parse_decimal_or_default("abc", 0.0), 0.0);
        assert_eq!(parse_decimal_or_default("12abc", 0.0), 0.0);
        assert_eq!(parse_decimal_or_default("", 5.0), 5.0);
        assert_eq!(parse_decimal_or_default("   ", 5.0), 5.0);
    }

    #[test]
    fn test_parse_non_finite_returns_default() {
        assert_eq!(parse_decimal_or_default("NaN", 1.0), 1.0);
        assert_eq!(parse_decimal_or_default("inf", 1.0), 1.0);
        assert_eq!(parse_decimal_or_default("-inf", 1.0), 1.0);
    }

    #[test]
    fn test_finite_or() {
        assert_eq!(finite_or(2.5, 0.0), 2.5);
        assert_eq!(finite_or(f64::NAN, 0.0), 0.0);
        assert_eq!(finite_or(f64::INFINITY, 7.0), 7.0);
    }

    #[test]
    fn test_amount_input_resolve() {
        assert_eq!(AmountInput::from(10.0).resolve(0.0), 10.0);
        assert_eq!(AmountInput::from("10").resolve(0.0), 10.0);
        assert_eq!(AmountInput::from("abc").resolve(0.0), 0.0);
        assert_eq!(AmountInput::Missing.resolve(0.0), 0.0);
        assert_eq!(AmountInput::Number(f64::NAN).resolve(0.0), 0.0);
    }

    #[test]
    fn test_amount_input_deserializes_all_shapes() {
        let n: AmountInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, AmountInput::Number(12.5));

        let s: AmountInput = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(s, AmountInput::Text("12.5".to_string()));

        let m: AmountInput = serde_json::from_str("null").unwrap();
        assert_eq!(m, AmountInput::Missing);
    }

    #[test]
    fn test_amount_input_default_is_missing() {
        assert!(AmountInput::default().is_missing());
    }
}
