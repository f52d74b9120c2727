//! Reentrancy protection for outgoing transfers
//!
//! One guard per ledger, not per caller. While it is held a payout is in
//! flight: its amount stays reserved against the bank cap and any nested
//! withdraw attempt is rejected and remembered.

use types::numeric::Amount;

/// Reentrancy guard preventing nested calls into the withdraw path.
///
/// The ledger acquires the guard before any withdraw logic runs and
/// releases it on every exit path. A second acquire while locked fails
/// and flags the in-flight payout as re-entered.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    locked: bool,
    reserved: Amount,
    reentered: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked, and records the attempt.
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            self.reentered = true;
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard and forget the in-flight payout.
    pub fn release(&mut self) {
        self.locked = false;
        self.reserved = Amount::ZERO;
        self.reentered = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Hold `amount` against the bank cap until release.
    pub fn reserve(&mut self, amount: Amount) {
        self.reserved = amount;
    }

    /// Amount of the payout currently in flight.
    pub fn reserved(&self) -> Amount {
        self.reserved
    }

    /// Whether a nested acquire was attempted since the last acquire.
    pub fn reentered(&self) -> bool {
        self.reentered
    }
}
