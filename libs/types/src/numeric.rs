//! Integral quantities of the ledger's fungible unit
//!
//! Amounts are whole, non-negative units. Every arithmetic operation is
//! checked; callers decide what an overflow or underflow means.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative integral quantity of the fungible unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(u128::MAX);

    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Raw number of units
    pub const fn units(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `None` on overflow
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Returns `None` if `rhs > self`
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    pub fn saturating_sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }

    /// Sum a sequence of amounts, `None` if the total overflows
    pub fn checked_sum<I>(amounts: I) -> Option<Amount>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |total, a| total.checked_add(a))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units as u128)
    }
}

impl From<Amount> for u128 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_checked_add_detects_overflow() {
        assert_eq!(Amount::MAX.checked_add(Amount::new(1)), None);
        assert_eq!(
            Amount::new(2).checked_add(Amount::new(3)),
            Some(Amount::new(5))
        );
    }

    #[test]
    fn test_checked_sub_detects_underflow() {
        assert_eq!(Amount::new(2).checked_sub(Amount::new(3)), None);
        assert_eq!(
            Amount::new(5).checked_sub(Amount::new(5)),
            Some(Amount::ZERO)
        );
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        assert_eq!(Amount::new(1).saturating_sub(Amount::new(9)), Amount::ZERO);
    }

    #[test]
    fn test_sum_of_amounts() {
        let total = Amount::checked_sum([1u128, 2, 3].into_iter().map(Amount::new));
        assert_eq!(total, Some(Amount::new(6)));

        let overflow = Amount::checked_sum([Amount::MAX, Amount::new(1)]);
        assert_eq!(overflow, None);
    }

    #[test]
    fn test_amount_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Amount::new(500)).unwrap();
        assert_eq!(json, "500");
        let back: Amount = serde_json::from_str("500").unwrap();
        assert_eq!(back, Amount::new(500));
    }

    #[test]
    fn test_negative_amount_rejected_on_deserialize() {
        assert!(serde_json::from_str::<Amount>("-1").is_err());
    }

    proptest! {
        #[test]
        fn prop_add_then_sub_is_identity(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
            let a = Amount::from(a);
            let b = Amount::from(b);
            let sum = a.checked_add(b).unwrap();
            prop_assert_eq!(sum.checked_sub(b), Some(a));
        }
    }
}
