//! Identifier types for ledger actors
//!
//! A principal is supplied by whatever authenticates callers; the ledger
//! only compares principals and uses them as map keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of an actor holding a balance.
///
/// Uses UUID v7 so freshly minted principals sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(Uuid);

impl Principal {
    /// Mint a new principal with the current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an identity issued elsewhere
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for Principal {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
