//! Types library for the custody ledger
//!
//! Value types shared by every crate in the workspace. They carry no
//! behavior beyond arithmetic safety and formatting, so the ledger engine
//! can treat them as opaque keys and quantities.
//!
//! # Modules
//! - `ids`: Actor identity (Principal)
//! - `numeric`: Non-negative integral quantities (Amount)

pub mod ids;
pub mod numeric;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
}
