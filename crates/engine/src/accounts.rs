//! Chart of accounts catalog.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use kontor_core::account::Account;
use kontor_core::ledger::LedgerError;

/// Lookup and listing of chart of accounts entries.
pub trait AccountCatalog: Send + Sync {
    /// Registers an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountExists` if the code is already registered.
    fn register(&self, account: Account) -> Result<(), LedgerError>;

    /// Finds an account by its code.
    fn find_by_code(&self, code: &str) -> Option<Account>;

    /// Returns all non-archived accounts, sorted by code.
    fn active_accounts(&self) -> Vec<Account>;

    /// Archives an account, excluding it from trial balances.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown code.
    fn archive(&self, code: &str) -> Result<(), LedgerError>;
}

/// In-memory account catalog.
#[derive(Debug, Default)]
pub struct MemoryAccountCatalog {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountCatalog for MemoryAccountCatalog {
    fn register(&self, account: Account) -> Result<(), LedgerError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);

        if accounts.contains_key(&account.code) {
            return Err(LedgerError::AccountExists(account.code));
        }

        accounts.insert(account.code.clone(), account);
        Ok(())
    }

    fn find_by_code(&self, code: &str) -> Option<Account> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.get(code).cloned()
    }

    fn active_accounts(&self) -> Vec<Account> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let mut active: Vec<Account> = accounts
            .values()
            .filter(|a| !a.is_archived)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.code.cmp(&b.code));
        active
    }

    fn archive(&self, code: &str) -> Result<(), LedgerError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        let account = accounts
            .get_mut(code)
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))?;
        account.is_archived = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontor_core::account::AccountKind;

    #[test]
    fn test_register_and_find() {
        let catalog = MemoryAccountCatalog::new();
        catalog
            .register(Account::new("1000", "Cash", AccountKind::Asset))
            .unwrap();

        let found = catalog.find_by_code("1000").unwrap();
        assert_eq!(found.name, "Cash");
        assert!(catalog.find_by_code("9999").is_none());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let catalog = MemoryAccountCatalog::new();
        catalog
            .register(Account::new("1000", "Cash", AccountKind::Asset))
            .unwrap();
        assert!(matches!(
            catalog.register(Account::new("1000", "Petty Cash", AccountKind::Asset)),
            Err(LedgerError::AccountExists(_))
        ));
    }

    #[test]
    fn test_active_accounts_excludes_archived() {
        let catalog = MemoryAccountCatalog::new();
        catalog
            .register(Account::new("2000", "Payables", AccountKind::Liability))
            .unwrap();
        catalog
            .register(Account::new("1000", "Cash", AccountKind::Asset))
            .unwrap();
        catalog.archive("2000").unwrap();

        let active = catalog.active_accounts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "1000");
    }

    #[test]
    fn test_active_accounts_sorted_by_code() {
        let catalog = MemoryAccountCatalog::new();
        for code in ["4000", "1000", "2000"] {
            catalog
                .register(Account::new(code, code, AccountKind::Asset))
                .unwrap();
        }

        let codes: Vec<String> = catalog.active_accounts().into_iter().map(|a| a.code).collect();
        assert_eq!(codes, vec!["1000", "2000", "4000"]);
    }

    #[test]
    fn test_archive_unknown_fails() {
        let catalog = MemoryAccountCatalog::new();
        assert!(matches!(
            catalog.archive("1000"),
            Err(LedgerError::AccountNotFound(_))
        ));
    }
}
