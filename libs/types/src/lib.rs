//! Types library for the restyle backend
//!
//! This library provides the type definitions shared by the ledger and
//! gateway services, ensuring type safety and a single error taxonomy.
//!
//! # Modules
//! - `ids`: Opaque identifiers (UserId, StyleKey)
//! - `account`: Per-user credit account and its mutation rules
//! - `catalog`: Static style template catalog
//! - `errors`: Error taxonomy

// Public modules
pub mod account;
pub mod catalog;
pub mod errors;
pub mod ids;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::account::*;
    pub use crate::catalog::*;
    pub use crate::errors::*;
    pub use crate::ids::*;
}
