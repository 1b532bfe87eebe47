//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive either as JSON numbers (`109.95`) or as numeric
//! strings (`"109.95"`). Both are parsed into a [`Decimal`] without going
//! through floating point, and anything negative or non-numeric is rejected
//! at the boundary instead of propagating into cart totals.
//!
//! Prices are currency-agnostic: the catalog never says which currency it
//! quotes in, so neither do we.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when parsing a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The value was neither a number nor a string.
    #[error("price must be a number or numeric string, got {0}")]
    WrongType(&'static str),

    /// The value could not be parsed as a decimal.
    #[error("price is not numeric: {0:?}")]
    NotNumeric(String),

    /// The value parsed but is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative product price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a price from its textual form (e.g. `"19.99"`, `"1e3"`).
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the text is not a non-negative decimal.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let parsed = if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed)
        } else {
            Decimal::from_str(trimmed)
        };
        let amount = parsed.map_err(|_| PriceError::NotNumeric(s.to_string()))?;
        Self::new(amount)
    }

    /// Parse a price from a raw JSON value.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the value is missing, of the wrong type, or
    /// not a non-negative decimal.
    pub fn from_json(value: &Value) -> Result<Self, PriceError> {
        match value {
            Value::Number(n) => Self::parse(&n.to_string()),
            Value::String(s) => Self::parse(s),
            Value::Null => Err(PriceError::WrongType("null")),
            Value::Bool(_) => Err(PriceError::WrongType("boolean")),
            Value::Array(_) => Err(PriceError::WrongType("array")),
            Value::Object(_) => Err(PriceError::WrongType("object")),
        }
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a quantity, or `None` on decimal overflow.
    #[must_use]
    pub fn checked_times(&self, quantity: u32) -> Option<Decimal> {
        self.0.checked_mul(Decimal::from(quantity))
    }
}

impl TryFrom<Value> for Price {
    type Error = PriceError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Serialized as a JSON number so stored carts stay readable by any client.
///
/// Amounts a JSON float cannot carry exactly are written as a numeric string,
/// which [`Price::from_json`] reads back to the same decimal.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = self.0.normalize();
        if normalized.scale() == 0
            && let Some(whole) = normalized.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match normalized.to_f64() {
            Some(float) if float_is_exact(float, normalized) => serializer.serialize_f64(float),
            _ => serializer.serialize_str(&normalized.to_string()),
        }
    }
}

/// Whether `float` reads back as exactly `amount`.
fn float_is_exact(float: f64, amount: Decimal) -> bool {
    Decimal::from_str(&float.to_string()).is_ok_and(|back| back == amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_number() {
        let price = Price::from_json(&json!(109.95)).unwrap();
        assert_eq!(price.amount(), Decimal::new(10995, 2));
    }

    #[test]
    fn test_parse_numeric_string() {
        let price = Price::from_json(&json!(" 22.3 ")).unwrap();
        assert_eq!(price.amount(), Decimal::new(223, 1));
    }

    #[test]
    fn test_parse_integer() {
        let price = Price::from_json(&json!(100)).unwrap();
        assert_eq!(price.amount(), Decimal::from(100));
    }

    #[test]
    fn test_parse_scientific() {
        let price = Price::parse("1.5e2").unwrap();
        assert_eq!(price.amount(), Decimal::from(150));
    }

    #[test]
    fn test_rejects_non_numeric_string() {
        assert!(matches!(
            Price::from_json(&json!("free")),
            Err(PriceError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_rejects_null_and_bool() {
        assert_eq!(
            Price::from_json(&Value::Null),
            Err(PriceError::WrongType("null"))
        );
        assert_eq!(
            Price::from_json(&json!(true)),
            Err(PriceError::WrongType("boolean"))
        );
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::from_json(&json!(-1)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
        assert_eq!(Price::parse("-0").unwrap().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_json_number() {
        assert_eq!(serde_json::to_value(Price::parse("100").unwrap()).unwrap(), json!(100));
        assert_eq!(
            serde_json::to_value(Price::parse("109.95").unwrap()).unwrap(),
            json!(109.95)
        );
    }

    #[test]
    fn test_serializes_high_precision_as_string() {
        for raw in [
            "19.999999999999999999",
            "123456789012345678901234",
            "0.1234567890123456789",
        ] {
            let price = Price::parse(raw).unwrap();
            let value = serde_json::to_value(price).unwrap();
            assert_eq!(value, json!(raw));
            assert_eq!(Price::from_json(&value).unwrap(), price);
        }
    }

    #[test]
    fn test_deserialize_through_serde() {
        let price: Price = serde_json::from_str("\"7.50\"").unwrap();
        assert_eq!(price.amount(), Decimal::new(75, 1));
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
    }

    #[test]
    fn test_checked_times() {
        let price = Price::parse("50").unwrap();
        assert_eq!(price.checked_times(3), Some(Decimal::from(150)));
        let huge = Price::new(Decimal::MAX).unwrap();
        assert_eq!(huge.checked_times(2), None);
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(Price::parse("7.50").unwrap().to_string(), "7.5");
    }
}
