//! Chart of accounts types.

use serde::{Deserialize, Serialize};

use kontor_shared::types::AccountId;

use crate::ledger::balance::NormalSide;

/// High-level account classification.
///
/// The kind determines the account's natural balance side: assets and
/// expenses increase with debits, the rest increase with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Asset account (cash, receivables, inventory).
    Asset,
    /// Liability account (payables, loans).
    Liability,
    /// Equity account (capital, retained earnings).
    Equity,
    /// Revenue account (sales, other income).
    Revenue,
    /// Expense account (supplies, salaries).
    Expense,
}

impl AccountKind {
    /// Returns the natural balance side for this kind of account.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::DebitNormal,
            Self::Liability | Self::Equity | Self::Revenue => NormalSide::CreditNormal,
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code (e.g., "1000").
    pub code: String,
    /// Account name (e.g., "Cash").
    pub name: String,
    /// Account classification.
    pub kind: AccountKind,
    /// Archived accounts are excluded from trial balances.
    pub is_archived: bool,
}

impl Account {
    /// Creates a new active account.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            kind,
            is_archived: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AccountKind::Asset, NormalSide::DebitNormal)]
    #[case(AccountKind::Expense, NormalSide::DebitNormal)]
    #[case(AccountKind::Liability, NormalSide::CreditNormal)]
    #[case(AccountKind::Equity, NormalSide::CreditNormal)]
    #[case(AccountKind::Revenue, NormalSide::CreditNormal)]
    fn test_normal_side(#[case] kind: AccountKind, #[case] expected: NormalSide) {
        assert_eq!(kind.normal_side(), expected);
    }

    #[test]
    fn test_new_account_is_active() {
        let account = Account::new("1000", "Cash", AccountKind::Asset);
        assert!(!account.is_archived);
        assert_eq!(account.code, "1000");
    }
}
