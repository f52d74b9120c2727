//! Capped custody ledger
//!
//! Tracks per-principal balances of a single fungible unit under a global
//! bank cap and a per-withdrawal limit. Withdrawals pay out through an
//! injected transfer agent and are protected against re-entrant
//! double-spend.
//!
//! # Modules
//! - `config`: Construction parameters (limits, unsolicited-value policy)
//! - `errors`: Ledger, configuration and transfer error types
//! - `events`: Audit events
//! - `security`: Ledger-wide reentrancy guard
//! - `transfer`: Outgoing transfer collaborator
//! - `ledger`: Balance accounting and guarded withdrawals

pub mod config;
pub mod errors;
pub mod events;
pub mod security;
pub mod transfer;
pub mod ledger;

pub use config::LedgerConfig;
pub use errors::{ConfigError, LedgerError, TransferError};
pub use events::LedgerEvent;
pub use ledger::{Ledger, LedgerStats};
pub use transfer::{PayoutRecorder, TransferAgent};
