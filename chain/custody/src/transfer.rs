//! External transfer collaborator
//!
//! The ledger pays out through a [`TransferAgent`]. The agent receives the
//! ledger itself, so an agent that hands control back (a re-entrant
//! withdraw) is representable and is rejected by the reentrancy guard.

use types::ids::Principal;
use types::numeric::Amount;

use crate::errors::TransferError;
use crate::ledger::Ledger;

/// Moves value out of the ledger to a principal.
///
/// Called after the ledger has already debited the recipient. Any `Err`
/// makes the enclosing withdrawal fail and roll back.
pub trait TransferAgent {
    fn transfer(
        &mut self,
        ledger: &mut Ledger,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

impl<F> TransferAgent for F
where
    F: FnMut(&mut Ledger, &Principal, Amount) -> Result<(), TransferError>,
{
    fn transfer(
        &mut self,
        ledger: &mut Ledger,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self(ledger, to, amount)
    }
}

/// In-memory agent that records every payout it is asked to make.
///
/// Can be switched into a rejecting mode to simulate an unreachable
/// recipient.
#[derive(Debug, Clone, Default)]
pub struct PayoutRecorder {
    payouts: Vec<(Principal, Amount)>,
    reject_reason: Option<String>,
}

impl PayoutRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent that refuses every transfer with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            payouts: Vec::new(),
            reject_reason: Some(reason.into()),
        }
    }

    pub fn set_rejecting(&mut self, reason: Option<String>) {
        self.reject_reason = reason;
    }

    /// Successful payouts in order.
    pub fn payouts(&self) -> &[(Principal, Amount)] {
        &self.payouts
    }

    /// Sum of all successful payouts to `to`.
    pub fn paid_to(&self, to: &Principal) -> Amount {
        Amount::checked_sum(
            self.payouts
                .iter()
                .filter(|(p, _)| p == to)
                .map(|(_, a)| *a),
        )
        .unwrap_or(Amount::MAX)
    }
}

impl TransferAgent for PayoutRecorder {
    fn transfer(
        &mut self,
        _ledger: &mut Ledger,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if let Some(reason) = &self.reject_reason {
            return Err(TransferError::rejected(reason.clone()));
        }
        self.payouts.push((*to, amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;

    fn ledger() -> Ledger {
        Ledger::new(LedgerConfig::new(Amount::new(100), Amount::new(1000))).unwrap()
    }

    #[test]
    fn test_recorder_records_payouts() {
        let mut ledger = ledger();
        let mut agent = PayoutRecorder::new();
        let alice = Principal::new();
        let bob = Principal::new();

        agent.transfer(&mut ledger, &alice, Amount::new(3)).unwrap();
        agent.transfer(&mut ledger, &bob, Amount::new(4)).unwrap();
        agent.transfer(&mut ledger, &alice, Amount::new(5)).unwrap();

        assert_eq!(agent.payouts().len(), 3);
        assert_eq!(agent.paid_to(&alice), Amount::new(8));
        assert_eq!(agent.paid_to(&bob), Amount::new(4));
    }

    #[test]
    fn test_rejecting_recorder() {
        let mut ledger = ledger();
        let mut agent = PayoutRecorder::rejecting("offline");
        let result = agent.transfer(&mut ledger, &Principal::new(), Amount::new(1));
        assert_eq!(result, Err(TransferError::rejected("offline")));
        assert!(agent.payouts().is_empty());

        agent.set_rejecting(None);
        assert!(agent
            .transfer(&mut ledger, &Principal::new(), Amount::new(1))
            .is_ok());
    }

    #[test]
    fn test_closure_agent() {
        let mut ledger = ledger();
        let mut calls = 0;
        let mut agent = |_: &mut Ledger, _: &Principal, _: Amount| {
            calls += 1;
            Ok::<(), TransferError>(())
        };
        agent
            .transfer(&mut ledger, &Principal::new(), Amount::new(1))
            .unwrap();
        assert_eq!(calls, 1);
    }
}
