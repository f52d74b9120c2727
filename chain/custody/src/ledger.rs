//! Ledger — capped custody of a single fungible unit
//!
//! Owns every piece of mutable state: per-principal balances, the running
//! total, operation counters and the reentrancy guard.
//!
//! Deposits are pure state updates. Withdrawals follow
//! checks → effects → interaction: the balance is debited before the
//! transfer agent runs, and the debit is compensated if the payout fails.
//! Between completed operations `total_deposited == Σ balances` and
//! `total_deposited <= bank_cap` always hold.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use types::ids::Principal;
use types::numeric::Amount;

use crate::config::LedgerConfig;
use crate::errors::{ConfigError, LedgerError, TransferError};
use crate::events::{Deposited, LedgerEvent, UnsolicitedValueReceived, Withdrawn};
use crate::security::ReentrancyGuard;
use crate::transfer::TransferAgent;

/// How incoming value reached the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Incoming {
    /// An explicit deposit call
    Deposit,
    /// A bare value transfer with no instruction attached
    Unsolicited,
}

/// Point-in-time summary of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_deposited: Amount,
    pub headroom: Amount,
    pub deposit_count: u64,
    pub withdrawal_count: u64,
    /// Principals with a non-zero balance
    pub funded_principals: usize,
}

/// The custody ledger.
///
/// Limits are fixed at construction. All mutation goes through
/// [`deposit`](Ledger::deposit), [`receive`](Ledger::receive) and
/// [`withdraw`](Ledger::withdraw); a failed call leaves no trace.
#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    /// Balances by principal; absent means zero
    balances: HashMap<Principal, Amount>,
    total_deposited: Amount,
    deposit_count: u64,
    withdrawal_count: u64,
    /// Held for the whole of each withdraw call
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create an empty ledger. Fails if either ceiling is zero.
    pub fn new(config: LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            withdrawal_limit = %config.withdrawal_limit,
            bank_cap = %config.bank_cap,
            accept_unsolicited = config.accept_unsolicited,
            "Ledger created"
        );

        Ok(Self {
            config,
            balances: HashMap::new(),
            total_deposited: Amount::ZERO,
            deposit_count: 0,
            withdrawal_count: 0,
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        })
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Credit `amount` to `caller`.
    ///
    /// Fails with `ZeroDeposit` or `CapExceeded`. Emits `Deposited`.
    pub fn deposit(
        &mut self,
        caller: Principal,
        amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        self.handle_incoming(caller, amount, Incoming::Deposit)
    }

    /// Accept value that arrived without a deposit instruction.
    ///
    /// Only allowed when the ledger was configured with
    /// `accept_unsolicited`; otherwise the value is refused with
    /// `UnsolicitedValueRejected`. When accepted it behaves exactly like
    /// [`deposit`](Ledger::deposit) and additionally records
    /// `UnsolicitedValueReceived`.
    pub fn receive(
        &mut self,
        caller: Principal,
        amount: Amount,
    ) -> Result<LedgerEvent, LedgerError> {
        if !self.config.accept_unsolicited {
            warn!(principal = %caller, amount = %amount, "Unsolicited value rejected");
            return Err(LedgerError::UnsolicitedValueRejected { amount });
        }
        self.handle_incoming(caller, amount, Incoming::Unsolicited)
    }

    fn handle_incoming(
        &mut self,
        caller: Principal,
        amount: Amount,
        origin: Incoming,
    ) -> Result<LedgerEvent, LedgerError> {
        // Checks
        if amount.is_zero() {
            warn!(principal = %caller, ?origin, "Zero deposit rejected");
            return Err(LedgerError::ZeroDeposit);
        }

        let headroom = self.headroom();
        if amount > headroom {
            warn!(
                principal = %caller,
                amount = %amount,
                headroom = %headroom,
                "Deposit would exceed bank cap"
            );
            return Err(LedgerError::CapExceeded {
                headroom,
                attempted: amount,
            });
        }

        // Effects. amount <= headroom bounds both sums by the cap.
        let balance = self.get_balance(&caller);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::CapExceeded {
                headroom,
                attempted: amount,
            })?;
        let new_total = self
            .total_deposited
            .checked_add(amount)
            .ok_or(LedgerError::CapExceeded {
                headroom,
                attempted: amount,
            })?;

        self.balances.insert(caller, new_balance);
        self.total_deposited = new_total;
        self.deposit_count += 1;

        let event = LedgerEvent::Deposited(Deposited {
            principal: caller,
            amount,
            new_balance,
        });
        self.events.push(event.clone());

        if origin == Incoming::Unsolicited {
            self.events
                .push(LedgerEvent::UnsolicitedValueReceived(UnsolicitedValueReceived {
                    principal: caller,
                    amount,
                }));
        }

        info!(
            principal = %caller,
            amount = %amount,
            new_balance = %new_balance,
            total = %self.total_deposited,
            ?origin,
            "Deposit accepted"
        );
        Ok(event)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Debit `amount` from `caller` and pay it out through `agent`.
    ///
    /// The whole call runs under the ledger's reentrancy guard; a nested
    /// withdraw (from inside `agent`) fails with `ReentrancyGuard`. If the
    /// agent fails, panics, or re-entered, the debit is undone and the
    /// call fails with `TransferFailed`. Emits `Withdrawn` on success.
    pub fn withdraw(
        &mut self,
        caller: Principal,
        amount: Amount,
        agent: &mut dyn TransferAgent,
    ) -> Result<LedgerEvent, LedgerError> {
        if !self.reentrancy_guard.acquire() {
            warn!(principal = %caller, amount = %amount, "Reentrant withdraw rejected");
            return Err(LedgerError::ReentrancyGuard);
        }

        let outcome = self.withdraw_guarded(caller, amount, agent);
        self.reentrancy_guard.release();
        outcome
    }

    fn withdraw_guarded(
        &mut self,
        caller: Principal,
        amount: Amount,
        agent: &mut dyn TransferAgent,
    ) -> Result<LedgerEvent, LedgerError> {
        // Checks
        if amount.is_zero() {
            warn!(principal = %caller, "Zero withdrawal rejected");
            return Err(LedgerError::ZeroWithdrawal);
        }

        let limit = self.config.withdrawal_limit;
        if amount > limit {
            warn!(
                principal = %caller,
                amount = %amount,
                limit = %limit,
                "Withdrawal limit exceeded"
            );
            return Err(LedgerError::WithdrawalLimitExceeded {
                requested: amount,
                limit,
            });
        }

        let available = self.get_balance(&caller);
        let (Some(new_balance), Some(new_total)) = (
            available.checked_sub(amount),
            self.total_deposited.checked_sub(amount),
        ) else {
            warn!(
                principal = %caller,
                amount = %amount,
                available = %available,
                "Insufficient balance for withdrawal"
            );
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        };

        // Effects, before any value leaves
        self.balances.insert(caller, new_balance);
        self.total_deposited = new_total;
        self.withdrawal_count += 1;
        self.reentrancy_guard.reserve(amount);

        // Interaction
        let payout = panic::catch_unwind(AssertUnwindSafe(|| {
            agent.transfer(&mut *self, &caller, amount)
        }));
        let failure = match payout {
            Ok(Ok(())) if self.reentrancy_guard.reentered() => Some(TransferError::Reentered),
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err),
            Err(_) => Some(TransferError::Panicked),
        };

        if let Some(reason) = failure {
            self.rollback_withdrawal(caller, amount);
            warn!(
                principal = %caller,
                amount = %amount,
                %reason,
                "Outgoing transfer failed, withdrawal rolled back"
            );
            return Err(LedgerError::TransferFailed);
        }

        let new_balance = self.get_balance(&caller);
        let event = LedgerEvent::Withdrawn(Withdrawn {
            principal: caller,
            amount,
            new_balance,
        });
        self.events.push(event.clone());

        info!(
            principal = %caller,
            amount = %amount,
            new_balance = %new_balance,
            total = %self.total_deposited,
            "Withdrawal completed"
        );
        Ok(event)
    }

    /// Undo the effects of a withdrawal whose payout failed.
    ///
    /// Compensates rather than restoring a snapshot, so deposits made by
    /// the agent while the payout was in flight survive. The reserved
    /// amount kept those deposits from using the headroom this restores.
    fn rollback_withdrawal(&mut self, caller: Principal, amount: Amount) {
        let balance = self.get_balance(&caller);
        self.balances
            .insert(caller, balance.checked_add(amount).unwrap_or(Amount::MAX));
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .unwrap_or(Amount::MAX);
        self.withdrawal_count = self.withdrawal_count.saturating_sub(1);

        debug!(
            principal = %caller,
            amount = %amount,
            restored_balance = %self.get_balance(&caller),
            total = %self.total_deposited,
            "Withdrawal effects compensated"
        );
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Balance of `principal`; zero if never seen.
    pub fn get_balance(&self, principal: &Principal) -> Amount {
        self.balances.get(principal).copied().unwrap_or(Amount::ZERO)
    }

    pub fn total_deposited(&self) -> Amount {
        self.total_deposited
    }

    pub fn deposit_count(&self) -> u64 {
        self.deposit_count
    }

    pub fn withdrawal_count(&self) -> u64 {
        self.withdrawal_count
    }

    pub fn withdrawal_limit(&self) -> Amount {
        self.config.withdrawal_limit
    }

    pub fn bank_cap(&self) -> Amount {
        self.config.bank_cap
    }

    pub fn accepts_unsolicited(&self) -> bool {
        self.config.accept_unsolicited
    }

    /// Whether a withdrawal payout is currently in progress.
    pub fn is_transfer_in_flight(&self) -> bool {
        self.reentrancy_guard.is_locked()
    }

    /// Room left under the bank cap for new deposits.
    ///
    /// An in-flight payout still counts against the cap until it settles.
    pub fn headroom(&self) -> Amount {
        self.config
            .bank_cap
            .saturating_sub(self.total_deposited)
            .saturating_sub(self.reentrancy_guard.reserved())
    }

    /// Recompute `Σ balances` and compare it with the recorded total.
    pub fn conservation_holds(&self) -> bool {
        Amount::checked_sum(self.balances.values().copied()) == Some(self.total_deposited)
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total_deposited: self.total_deposited,
            headroom: self.headroom(),
            deposit_count: self.deposit_count,
            withdrawal_count: self.withdrawal_count,
            funded_principals: self.balances.values().filter(|b| !b.is_zero()).count(),
        }
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}
