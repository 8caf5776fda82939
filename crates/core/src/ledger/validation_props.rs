//! Property-based tests for ledger entry validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use kontor_shared::types::TransactionId;

use super::entry::{EntryType, LedgerEntry};
use super::error::LedgerError;
use super::validation::{entry_totals, validate_entries};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy to generate an entry type.
fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

/// Helper to create a ledger entry for testing.
fn make_entry(entry_type: EntryType, amount: Decimal) -> LedgerEntry {
    LedgerEntry::new(TransactionId::new(), "1000", entry_type, amount)
}

/// Builds a balanced entry set: each amount appears once as a debit and once
/// as a credit.
fn balanced_entries(amounts: &[Decimal]) -> Vec<LedgerEntry> {
    let mut entries = Vec::with_capacity(amounts.len() * 2);
    for amount in amounts {
        entries.push(make_entry(EntryType::Debit, *amount));
        entries.push(make_entry(EntryType::Credit, *amount));
    }
    entries
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* set of mirrored debit/credit amounts, validation SHALL pass
    /// and the totals SHALL be equal.
    #[test]
    fn prop_mirrored_entries_validate(
        amounts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let entries = balanced_entries(&amounts);

        prop_assert!(validate_entries(&entries).is_ok());

        let (debits, credits) = entry_totals(&entries);
        prop_assert_eq!(debits, credits);
    }

    /// *For any* balanced entry set, perturbing a single debit amount SHALL
    /// make validation fail with an unbalanced error.
    #[test]
    fn prop_perturbed_entries_rejected(
        amounts in prop::collection::vec(positive_amount(), 1..8),
        delta in positive_amount(),
    ) {
        let mut entries = balanced_entries(&amounts);
        entries[0].amount += delta;

        let result = validate_entries(&entries);
        prop_assert!(
            matches!(result, Err(LedgerError::UnbalancedTransaction { .. })),
            "perturbed entries should be unbalanced, got: {:?}",
            result
        );
    }

    /// *For any* entry with a negative amount, validation SHALL reject the
    /// set regardless of the other entries.
    #[test]
    fn prop_negative_amount_rejected(
        entry_type in entry_type_strategy(),
        neg_amount in negative_amount(),
        amounts in prop::collection::vec(positive_amount(), 0..4),
    ) {
        let mut entries = balanced_entries(&amounts);
        entries.push(make_entry(entry_type, neg_amount));

        let result = validate_entries(&entries);
        prop_assert!(
            matches!(result, Err(LedgerError::NegativeAmount)),
            "negative amount should be rejected, got: {:?}",
            result
        );
    }

    /// *For any* single nonzero entry, validation SHALL fail: one side of
    /// the books cannot balance on its own.
    #[test]
    fn prop_single_entry_rejected(
        entry_type in entry_type_strategy(),
        amount in positive_amount(),
    ) {
        let entries = vec![make_entry(entry_type, amount)];

        let result = validate_entries(&entries);
        prop_assert!(
            matches!(result, Err(LedgerError::UnbalancedTransaction { .. })),
            "single nonzero entry should be unbalanced, got: {:?}",
            result
        );
    }

    /// The signed amounts of a balanced entry set SHALL sum to zero.
    #[test]
    fn prop_signed_amounts_sum_to_zero(
        amounts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let entries = balanced_entries(&amounts);
        let total: Decimal = entries.iter().map(LedgerEntry::signed_amount).sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }
}
