//! Ledger error types for validation, state and lookup failures.
//!
//! Validation errors are always surfaced to the caller, never silently
//! corrected. State errors are fatal to the requested operation and must not
//! mutate state. Concurrency hazards (duplicate sequence numbers, lost
//! period-close races) are prevented by design in the engine and therefore
//! have no error variants here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction is not balanced (debits != credits).
    #[error("Transaction is not balanced. Debits: {debits}, Credits: {credits}")]
    UnbalancedTransaction {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Entry amount cannot be negative.
    #[error("Entry amount cannot be negative")]
    NegativeAmount,

    /// Entry references no account.
    #[error("Entry is missing an account code")]
    MissingAccountCode,

    /// Transaction has no entries.
    #[error("Transaction must have at least one entry")]
    NoEntries,

    // ========== State Errors ==========
    /// Fiscal period is closed, no posting or unposting allowed.
    #[error("Fiscal period {0} is closed, no posting allowed")]
    PeriodClosed(String),

    // ========== Not Found Errors ==========
    /// No fiscal period covers the given date.
    #[error("No fiscal period found for date {0}")]
    NoFiscalPeriod(NaiveDate),

    /// Fiscal period code is not registered.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(String),

    /// Sequence code is not registered.
    #[error("Sequence not found: {0}")]
    SequenceNotFound(String),

    /// Account code is not registered.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Transaction number is unknown.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // ========== Conflict Errors ==========
    /// Sequence code is already registered.
    #[error("Sequence already exists: {0}")]
    SequenceExists(String),

    /// Account code is already registered.
    #[error("Account already exists: {0}")]
    AccountExists(String),

    /// Fiscal period date range overlaps a registered period.
    #[error("Fiscal period {code} overlaps existing period {other}")]
    PeriodOverlap {
        /// Code of the period being registered.
        code: String,
        /// Code of the period it collides with.
        other: String,
    },

    // ========== Internal Errors ==========
    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::MissingAccountCode => "MISSING_ACCOUNT_CODE",
            Self::NoEntries => "NO_ENTRIES",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::NoFiscalPeriod(_) => "NO_FISCAL_PERIOD",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::SequenceNotFound(_) => "SEQUENCE_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::SequenceExists(_) => "SEQUENCE_EXISTS",
            Self::AccountExists(_) => "ACCOUNT_EXISTS",
            Self::PeriodOverlap { .. } => "PERIOD_OVERLAP",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::UnbalancedTransaction { .. }
            | Self::NegativeAmount
            | Self::MissingAccountCode
            | Self::NoEntries => 400,

            // 422 Unprocessable - state errors
            Self::PeriodClosed(_) => 422,

            // 404 Not Found
            Self::NoFiscalPeriod(_)
            | Self::PeriodNotFound(_)
            | Self::SequenceNotFound(_)
            | Self::AccountNotFound(_)
            | Self::TransactionNotFound(_) => 404,

            // 409 Conflict
            Self::SequenceExists(_) | Self::AccountExists(_) | Self::PeriodOverlap { .. } => 409,

            // 500 Internal Server Error
            Self::Internal(_) => 500,
        }
    }

    /// Returns true if this is a validation failure the caller can fix by
    /// correcting the transaction.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedTransaction { .. }
                | Self::NegativeAmount
                | Self::MissingAccountCode
                | Self::NoEntries
        )
    }
}
