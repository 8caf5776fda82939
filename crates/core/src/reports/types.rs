//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::AccountKind;
use crate::ledger::entry::LedgerEntry;

/// One account row of a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub kind: AccountKind,
    /// Balance reported on the debit column.
    pub debit_balance: Decimal,
    /// Balance reported on the credit column.
    pub credit_balance: Decimal,
    /// Net balance signed by the account's natural side.
    pub net_balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total of the debit column.
    pub total_debits: Decimal,
    /// Total of the credit column.
    pub total_credits: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Account rows.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// Journal report: a filtered entry listing with aggregate totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalReport {
    /// The entries matched by the query.
    pub entries: Vec<LedgerEntry>,
    /// Total debit amount across the entries.
    pub total_debits: Decimal,
    /// Total credit amount across the entries.
    pub total_credits: Decimal,
    /// Whether the listed entries balance.
    pub is_balanced: bool,
}

/// Read-only reconstruction of a posted transaction's integrity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditTrail {
    /// The transaction number under audit.
    pub transaction_number: String,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Transaction description.
    pub description: String,
    /// Every entry belonging to the transaction.
    pub entries: Vec<LedgerEntry>,
    /// Total debit amount.
    pub total_debits: Decimal,
    /// Total credit amount.
    pub total_credits: Decimal,
    /// Whether the transaction balances.
    pub is_balanced: bool,
    /// Distinct account codes affected, sorted.
    pub account_codes: Vec<String>,
}
