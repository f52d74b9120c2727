//! Ledger construction parameters
//!
//! Both ceilings are fixed for the lifetime of a ledger. There is no
//! built-in withdrawal limit: deployments that want a constant supply it
//! here like any other value.

use serde::{Deserialize, Serialize};
use types::numeric::Amount;

use crate::errors::ConfigError;

/// Parameters a [`Ledger`](crate::ledger::Ledger) is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Maximum amount moved by a single withdrawal
    pub withdrawal_limit: Amount,
    /// Maximum sum of all balances
    pub bank_cap: Amount,
    /// Accept bare incoming value as an implicit deposit
    #[serde(default)]
    pub accept_unsolicited: bool,
}

impl LedgerConfig {
    /// Explicit-deposit-only configuration.
    pub fn new(withdrawal_limit: Amount, bank_cap: Amount) -> Self {
        Self {
            withdrawal_limit,
            bank_cap,
            accept_unsolicited: false,
        }
    }

    pub fn with_unsolicited(mut self, accept: bool) -> Self {
        self.accept_unsolicited = accept;
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.withdrawal_limit.is_zero() {
            return Err(ConfigError::ZeroWithdrawalLimit);
        }
        if self.bank_cap.is_zero() {
            return Err(ConfigError::ZeroBankCap);
        }
        Ok(())
    }
}
