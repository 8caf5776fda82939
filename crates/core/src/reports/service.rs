//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::account::Account;
use crate::ledger::balance::{AccountBalance, NormalSide};
use crate::ledger::entry::LedgerEntry;
use crate::ledger::transaction::Transaction;
use crate::ledger::validation::entry_totals;

use super::types::{
    AuditTrail, JournalReport, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};

/// Service for assembling financial reports from balances and entries.
///
/// All functions here are pure aggregation; the engine supplies the balances
/// and entry slices from the ledger store.
pub struct ReportService;

impl ReportService {
    /// Builds a trial balance row for one account.
    ///
    /// The net debit balance lands in the debit column when positive and in
    /// the credit column when negative; the net balance is signed by the
    /// account's natural side.
    #[must_use]
    pub fn trial_balance_row(account: &Account, balance: &AccountBalance) -> TrialBalanceRow {
        let net = balance.balance;
        let net_balance = match account.kind.normal_side() {
            NormalSide::DebitNormal => net,
            NormalSide::CreditNormal => -net,
        };

        TrialBalanceRow {
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            kind: account.kind,
            debit_balance: net.max(Decimal::ZERO),
            credit_balance: (-net).max(Decimal::ZERO),
            net_balance,
        }
    }

    /// Assembles a trial balance report from per-account rows.
    ///
    /// Assuming only balanced transactions were ever posted, the column
    /// totals are equal for any as-of date.
    #[must_use]
    pub fn generate_trial_balance(as_of: NaiveDate, rows: Vec<TrialBalanceRow>) -> TrialBalanceReport {
        let total_debits: Decimal = rows.iter().map(|r| r.debit_balance).sum();
        let total_credits: Decimal = rows.iter().map(|r| r.credit_balance).sum();

        TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals {
                total_debits,
                total_credits,
                is_balanced: total_debits == total_credits,
            },
        }
    }

    /// Wraps a queried entry listing with aggregate totals.
    #[must_use]
    pub fn journal_report(entries: Vec<LedgerEntry>) -> JournalReport {
        let (total_debits, total_credits) = entry_totals(&entries);

        JournalReport {
            entries,
            total_debits,
            total_credits,
            is_balanced: total_debits == total_credits,
        }
    }

    /// Reconstructs the audit trail of a numbered transaction.
    #[must_use]
    pub fn audit_trail(transaction: &Transaction, transaction_number: &str) -> AuditTrail {
        let (total_debits, total_credits) = entry_totals(&transaction.entries);

        let mut account_codes: Vec<String> = transaction
            .entries
            .iter()
            .map(|e| e.account_code.clone())
            .collect();
        account_codes.sort();
        account_codes.dedup();

        AuditTrail {
            transaction_number: transaction_number.to_string(),
            transaction_date: transaction.transaction_date,
            description: transaction.description.clone(),
            entries: transaction.entries.clone(),
            total_debits,
            total_credits,
            is_balanced: total_debits == total_credits,
            account_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountKind;
    use crate::ledger::entry::EntryType;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()
    }

    fn balance_of(code: &str, debit: Decimal, credit: Decimal) -> AccountBalance {
        let mut balance = AccountBalance::new(code);
        balance.add_debit(debit);
        balance.add_credit(credit);
        balance
    }

    #[test]
    fn test_trial_balance_row_debit_normal() {
        let account = Account::new("1000", "Cash", AccountKind::Asset);
        let row = ReportService::trial_balance_row(&account, &balance_of("1000", dec!(150), dec!(50)));

        assert_eq!(row.debit_balance, dec!(100));
        assert_eq!(row.credit_balance, dec!(0));
        assert_eq!(row.net_balance, dec!(100));
    }

    #[test]
    fn test_trial_balance_row_credit_normal() {
        let account = Account::new("4000", "Sales", AccountKind::Revenue);
        let row = ReportService::trial_balance_row(&account, &balance_of("4000", dec!(20), dec!(120)));

        assert_eq!(row.debit_balance, dec!(0));
        assert_eq!(row.credit_balance, dec!(100));
        assert_eq!(row.net_balance, dec!(100));
    }

    #[test]
    fn test_trial_balance_totals() {
        let cash = Account::new("1000", "Cash", AccountKind::Asset);
        let sales = Account::new("4000", "Sales", AccountKind::Revenue);

        let rows = vec![
            ReportService::trial_balance_row(&cash, &balance_of("1000", dec!(100), dec!(0))),
            ReportService::trial_balance_row(&sales, &balance_of("4000", dec!(0), dec!(100))),
        ];

        let report = ReportService::generate_trial_balance(date(), rows);
        assert_eq!(report.totals.total_debits, dec!(100));
        assert_eq!(report.totals.total_credits, dec!(100));
        assert!(report.totals.is_balanced);
    }

    #[test]
    fn test_journal_report_totals() {
        let mut txn = Transaction::new(date(), "Sale");
        txn.add_entry("1000", EntryType::Debit, dec!(75));
        txn.add_entry("4000", EntryType::Credit, dec!(75));

        let report = ReportService::journal_report(txn.entries);
        assert_eq!(report.total_debits, dec!(75));
        assert_eq!(report.total_credits, dec!(75));
        assert!(report.is_balanced);
    }

    #[test]
    fn test_audit_trail_distinct_accounts() {
        let mut txn = Transaction::new(date(), "Split payment");
        txn.add_entry("6000", EntryType::Debit, dec!(60));
        txn.add_entry("6000", EntryType::Debit, dec!(40));
        txn.add_entry("1000", EntryType::Credit, dec!(100));

        let trail = ReportService::audit_trail(&txn, "TXN-1");
        assert_eq!(trail.transaction_number, "TXN-1");
        assert_eq!(trail.account_codes, vec!["1000", "6000"]);
        assert_eq!(trail.total_debits, dec!(100));
        assert_eq!(trail.total_credits, dec!(100));
        assert!(trail.is_balanced);
        assert_eq!(trail.entries.len(), 3);
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// *For any* set of per-account net positions that sums to zero, the
        /// trial balance columns SHALL total to the same value.
        #[test]
        fn prop_trial_balance_closure(
            pairs in prop::collection::vec((amount_strategy(), amount_strategy()), 1..10),
        ) {
            // Build accounts whose nets cancel out pairwise: each pair posts
            // amount X as a debit on one account and a credit on another.
            let mut rows = Vec::new();
            for (i, (debit, credit)) in pairs.iter().enumerate() {
                let asset = Account::new(format!("1{i:03}"), "Asset", AccountKind::Asset);
                let revenue = Account::new(format!("4{i:03}"), "Revenue", AccountKind::Revenue);

                rows.push(ReportService::trial_balance_row(
                    &asset,
                    &balance_of(&asset.code, *debit, *credit),
                ));
                rows.push(ReportService::trial_balance_row(
                    &revenue,
                    &balance_of(&revenue.code, *credit, *debit),
                ));
            }

            let report = ReportService::generate_trial_balance(date(), rows);
            prop_assert_eq!(report.totals.total_debits, report.totals.total_credits);
            prop_assert!(report.totals.is_balanced);
        }
    }
}
