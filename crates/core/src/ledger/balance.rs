//! Account balance calculation rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Natural balance side of an account.
///
/// - Asset/Expense: balance increases with debits (debit-normal)
/// - Liability/Equity/Revenue: balance increases with credits (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSide {
    /// Debit-normal accounts (Asset, Expense).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    CreditNormal,
}

impl NormalSide {
    /// Calculates the balance change for an entry on this side.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}

/// Account balance at a point in time.
///
/// The net balance is always `debit_total - credit_total` (positive = net
/// debit); normal-side normalization happens at report time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account code.
    pub account_code: String,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// Net balance (debits minus credits).
    pub balance: Decimal,
}

impl AccountBalance {
    /// Creates a zero balance for an account.
    #[must_use]
    pub fn new(account_code: impl Into<String>) -> Self {
        Self {
            account_code: account_code.into(),
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Adds a debit amount.
    pub fn add_debit(&mut self, amount: Decimal) {
        self.debit_total += amount;
        self.balance = self.debit_total - self.credit_total;
    }

    /// Adds a credit amount.
    pub fn add_credit(&mut self, amount: Decimal) {
        self.credit_total += amount;
        self.balance = self.debit_total - self.credit_total;
    }
}

/// Debit/credit turnover over a date range, reported without netting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turnover {
    /// Sum of debit amounts in the range.
    pub debit_turnover: Decimal,
    /// Sum of credit amounts in the range.
    pub credit_turnover: Decimal,
}

impl Turnover {
    /// A zero turnover.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            debit_turnover: Decimal::ZERO,
            credit_turnover: Decimal::ZERO,
        }
    }
}
