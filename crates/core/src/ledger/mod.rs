//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Ledger entries (debits and credits)
//! - Transaction aggregates with posting state
//! - Balance calculation rules
//! - Business rule validation
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::{AccountBalance, NormalSide, Turnover};
pub use entry::{EntryType, LedgerEntry};
pub use error::LedgerError;
pub use transaction::{Transaction, TransactionTotals};
pub use validation::{entry_totals, validate_entries};
