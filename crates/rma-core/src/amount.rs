//! # Monetary Amounts
//!
//! Refund amounts in integer minor units (e.g. cents). Floats never enter
//! the core — amounts arrive as integers or integer strings and are
//! rejected otherwise. Negative amounts are unrepresentable: an [`Amount`]
//! is non-negative by construction, which is what makes the aggregate's
//! "refund amount, if present, is never negative" invariant structural
//! rather than checked at every use site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-negative monetary amount in minor units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Create an amount from integer minor units, rejecting negatives.
    pub fn from_minor_units(units: i64) -> Result<Self, AmountError> {
        if units < 0 {
            return Err(AmountError::Negative(units));
        }
        Ok(Self(units))
    }

    /// Parse an amount from an integer string (no decimal point, no sign).
    ///
    /// `"12.34"` and `"-100"` are both rejected; the payment collaborator
    /// converts currency-formatted values to minor units before they reach
    /// this core.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let units: i64 = s
            .parse()
            .map_err(|_| AmountError::Unparseable(s.to_string()))?;
        Self::from_minor_units(units)
    }

    /// The amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = AmountError;

    fn try_from(units: i64) -> Result<Self, Self::Error> {
        Self::from_minor_units(units)
    }
}

impl From<Amount> for i64 {
    fn from(a: Amount) -> i64 {
        a.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monetary amount validation failures.
#[derive(Error, Debug)]
pub enum AmountError {
    /// Not an integer string.
    #[error("invalid monetary amount: \"{0}\" (expected integer minor units)")]
    Unparseable(String),

    /// Negative amounts are not permitted anywhere in the core.
    #[error("negative amount not permitted: {0}")]
    Negative(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_minor_units_accepts_zero_and_positive() {
        assert_eq!(Amount::from_minor_units(0).unwrap(), Amount::zero());
        assert_eq!(Amount::from_minor_units(500).unwrap().minor_units(), 500);
    }

    #[test]
    fn from_minor_units_rejects_negative() {
        assert!(matches!(
            Amount::from_minor_units(-1),
            Err(AmountError::Negative(-1))
        ));
    }

    #[test]
    fn parse_rejects_floats_and_signs() {
        assert!(Amount::parse("12.34").is_err());
        assert!(Amount::parse("-100").is_err());
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("").is_err());
        assert_eq!(Amount::parse("12345").unwrap().minor_units(), 12345);
    }

    #[test]
    fn serde_rejects_negative_on_deserialize() {
        let ok: Amount = serde_json::from_str("500").unwrap();
        assert_eq!(ok.minor_units(), 500);
        let bad: Result<Amount, _> = serde_json::from_str("-500");
        assert!(bad.is_err());
    }

    #[test]
    fn serde_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Amount::from_minor_units(750).unwrap()).unwrap();
        assert_eq!(json, "750");
    }
}
