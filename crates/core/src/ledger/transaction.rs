//! Transaction aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kontor_shared::types::TransactionId;

use super::entry::{EntryType, LedgerEntry};

/// A financial transaction consisting of balanced ledger entries.
///
/// Transactions are created unposted by document translation, and only the
/// posting engine mutates them afterwards: it assigns numbers and flips
/// `is_posted`. Transactions are never deleted; a posted transaction can be
/// reverted with unpost while its fiscal period remains open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-facing transaction number, assigned when first posted.
    pub transaction_number: Option<String>,
    /// Transaction date, used for fiscal period resolution.
    pub transaction_date: NaiveDate,
    /// Transaction description.
    pub description: String,
    /// Source document reference, if any.
    pub document_number: Option<String>,
    /// Whether the transaction is currently posted to the ledger.
    pub is_posted: bool,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last updated.
    pub updated_at: DateTime<Utc>,
    /// Ledger entries, exclusively owned by this transaction.
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

/// Transaction totals for validation and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionTotals {
    /// Total debit amount.
    pub total_debits: Decimal,
    /// Total credit amount.
    pub total_credits: Decimal,
    /// Whether the transaction is balanced (debits == credits).
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates new transaction totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debits: Decimal, total_credits: Decimal) -> Self {
        Self {
            total_debits,
            total_credits,
            is_balanced: total_debits == total_credits,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debits - self.total_credits
    }
}

impl Transaction {
    /// Creates a new unposted transaction with no entries.
    #[must_use]
    pub fn new(transaction_date: NaiveDate, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            transaction_number: None,
            transaction_date,
            description: description.into(),
            document_number: None,
            is_posted: false,
            created_at: now,
            updated_at: now,
            entries: Vec::new(),
        }
    }

    /// Adds an entry line to the transaction.
    pub fn add_entry(
        &mut self,
        account_code: impl Into<String>,
        entry_type: EntryType,
        amount: Decimal,
    ) {
        let entry = LedgerEntry::new(self.id, account_code, entry_type, amount);
        self.entries.push(entry);
    }

    /// Adds an entry line with a descriptive label.
    pub fn add_described_entry(
        &mut self,
        account_code: impl Into<String>,
        entry_type: EntryType,
        amount: Decimal,
        description: impl Into<String>,
    ) {
        let mut entry = LedgerEntry::new(self.id, account_code, entry_type, amount);
        entry.description = Some(description.into());
        self.entries.push(entry);
    }

    /// Computes debit/credit totals over the owned entries.
    #[must_use]
    pub fn totals(&self) -> TransactionTotals {
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;

        for entry in &self.entries {
            match entry.entry_type {
                EntryType::Debit => total_debits += entry.amount,
                EntryType::Credit => total_credits += entry.amount,
            }
        }

        TransactionTotals::new(total_debits, total_credits)
    }

    /// Returns true if the transaction has been assigned a number.
    #[must_use]
    pub fn is_numbered(&self) -> bool {
        self.transaction_number.is_some()
    }
}
