//! Ledger entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kontor_shared::types::{LedgerEntryId, TransactionId};

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

/// A single ledger entry in a transaction.
///
/// Each transaction consists of multiple entries that must balance
/// (debits = credits). The amount is always a non-negative magnitude;
/// direction is carried exclusively by `entry_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The transaction this entry belongs to.
    pub transaction_id: TransactionId,
    /// Human-facing entry number, assigned when the transaction is posted.
    pub entry_number: Option<String>,
    /// Owning transaction's number, stamped when the transaction is posted.
    pub transaction_number: Option<String>,
    /// Code of the account affected by this entry.
    pub account_code: String,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Optional description for this line item.
    pub description: Option<String>,
}

impl LedgerEntry {
    /// Creates an unnumbered entry for the given transaction.
    #[must_use]
    pub fn new(
        transaction_id: TransactionId,
        account_code: impl Into<String>,
        entry_type: EntryType,
        amount: Decimal,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            transaction_id,
            entry_number: None,
            transaction_number: None,
            account_code: account_code.into(),
            entry_type,
            amount,
            description: None,
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }

    /// Returns true if this entry has been assigned an entry number.
    #[must_use]
    pub fn is_numbered(&self) -> bool {
        self.entry_number.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_amount() {
        let txn_id = TransactionId::new();
        let debit = LedgerEntry::new(txn_id, "1000", EntryType::Debit, dec!(25.50));
        let credit = LedgerEntry::new(txn_id, "2000", EntryType::Credit, dec!(25.50));

        assert_eq!(debit.signed_amount(), dec!(25.50));
        assert_eq!(credit.signed_amount(), dec!(-25.50));
    }

    #[test]
    fn test_new_entry_is_unnumbered() {
        let entry = LedgerEntry::new(TransactionId::new(), "1000", EntryType::Debit, dec!(1));
        assert!(!entry.is_numbered());
        assert!(entry.transaction_number.is_none());
    }
}
