//! Ledger error types
//!
//! Every rejected operation returns one of these with enough payload to
//! reconstruct the request. None of them leave partial state behind.

use thiserror::Error;
use types::numeric::Amount;

/// Failures of deposit, receive and withdraw operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Deposit amount must be positive")]
    ZeroDeposit,

    #[error("Withdrawal amount must be positive")]
    ZeroWithdrawal,

    #[error("Bank cap exceeded: attempted {attempted}, headroom {headroom}")]
    CapExceeded { headroom: Amount, attempted: Amount },

    #[error("Withdrawal limit exceeded: requested {requested}, limit {limit}")]
    WithdrawalLimitExceeded { requested: Amount, limit: Amount },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Outgoing transfer failed")]
    TransferFailed,

    #[error("Reentrancy detected: a withdrawal is already in flight")]
    ReentrancyGuard,

    #[error("Unsolicited value rejected: {amount}")]
    UnsolicitedValueRejected { amount: Amount },
}

/// Construction-time configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Withdrawal limit must be positive")]
    ZeroWithdrawalLimit,

    #[error("Bank cap must be positive")]
    ZeroBankCap,

    #[error("Invalid ledger configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Failure reported by (or on behalf of) a transfer collaborator.
///
/// Never returned to withdraw callers directly; it collapses into
/// [`LedgerError::TransferFailed`] after the debit is rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Transfer rejected: {reason}")]
    Rejected { reason: String },

    #[error("Collaborator re-entered withdraw during payout")]
    Reentered,

    #[error("Collaborator panicked during payout")]
    Panicked,
}

impl TransferError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        TransferError::Rejected {
            reason: reason.into(),
        }
    }
}
