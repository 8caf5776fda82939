//! Business rule validation for ledger operations.

use rust_decimal::Decimal;

use super::entry::{EntryType, LedgerEntry};
use super::error::LedgerError;

/// Sums a set of entries by type, returning `(debits, credits)`.
#[must_use]
pub fn entry_totals(entries: &[LedgerEntry]) -> (Decimal, Decimal) {
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for entry in entries {
        match entry.entry_type {
            EntryType::Debit => debits += entry.amount,
            EntryType::Credit => credits += entry.amount,
        }
    }

    (debits, credits)
}

/// Validates that a set of ledger entries may be posted.
///
/// The balance rule is exact decimal equality with no tolerance. Amounts are
/// non-negative magnitudes; a negative amount is a validation error, never a
/// direction flip.
///
/// # Errors
///
/// Returns an error if the entries are empty, reference no account, carry a
/// negative amount, or do not balance.
pub fn validate_entries(entries: &[LedgerEntry]) -> Result<(), LedgerError> {
    if entries.is_empty() {
        return Err(LedgerError::NoEntries);
    }

    for entry in entries {
        if entry.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if entry.account_code.trim().is_empty() {
            return Err(LedgerError::MissingAccountCode);
        }
    }

    let (debits, credits) = entry_totals(entries);
    if debits != credits {
        return Err(LedgerError::UnbalancedTransaction { debits, credits });
    }

    Ok(())
}
