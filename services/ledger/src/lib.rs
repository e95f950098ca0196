//! Credit ledger
//!
//! Owns the per-user credit balance. The store contract and its
//! read-decide-commit transaction loop live in `store`; the business
//! rules layered on top live in `service`.
//!
//! # Modules
//! - `store`: `LedgerStore` trait, transaction loop, in-memory backend
//! - `service`: `CreditService` business operations
//! - `config`: tunables (starting balance, per-render charge, retry budget)

pub mod config;
pub mod service;
pub mod store;

pub use config::CreditConfig;
pub use service::{BalanceView, CreditService};
pub use store::{run_transaction, LedgerStore, MemoryLedgerStore, TxDecision};
