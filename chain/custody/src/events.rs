//! Ledger audit events
//!
//! Immutable records appended by successful operations. Rejected
//! operations never emit anything.

use serde::{Deserialize, Serialize};
use types::ids::Principal;
use types::numeric::Amount;

/// Value credited to a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub principal: Principal,
    pub amount: Amount,
    pub new_balance: Amount,
}

/// Value debited from a principal and paid out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub principal: Principal,
    pub amount: Amount,
    pub new_balance: Amount,
}

/// Value arrived without an explicit deposit instruction and was
/// accepted as an implicit deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsolicitedValueReceived {
    pub principal: Principal,
    pub amount: Amount,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    UnsolicitedValueReceived(UnsolicitedValueReceived),
}

impl LedgerEvent {
    /// Principal the event concerns.
    pub fn principal(&self) -> &Principal {
        match self {
            LedgerEvent::Deposited(e) => &e.principal,
            LedgerEvent::Withdrawn(e) => &e.principal,
            LedgerEvent::UnsolicitedValueReceived(e) => &e.principal,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            LedgerEvent::Deposited(e) => e.amount,
            LedgerEvent::Withdrawn(e) => e.amount,
            LedgerEvent::UnsolicitedValueReceived(e) => e.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposited_serialization() {
        let event = LedgerEvent::Deposited(Deposited {
            principal: Principal::new(),
            amount: Amount::new(500),
            new_balance: Amount::new(500),
        });
        let json = serde_json::to_string(&event).unwrap();
        let deser: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_withdrawn_json_shape() {
        let principal = Principal::new();
        let event = Withdrawn {
            principal,
            amount: Amount::new(100),
            new_balance: Amount::new(400),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["amount"], 100);
        assert_eq!(value["new_balance"], 400);
        assert_eq!(value["principal"], principal.to_string());
    }

    #[test]
    fn test_event_accessors() {
        let principal = Principal::new();
        let event = LedgerEvent::UnsolicitedValueReceived(UnsolicitedValueReceived {
            principal,
            amount: Amount::new(7),
        });
        assert_eq!(event.principal(), &principal);
        assert_eq!(event.amount(), Amount::new(7));
    }
}
