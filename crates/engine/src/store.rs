//! Ledger store: an append/query collection of transactions and entries.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use kontor_core::ledger::{LedgerEntry, LedgerError, Transaction};
use kontor_shared::types::TransactionId;

/// Filter over stored ledger entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Restrict to one account code.
    pub account_code: Option<String>,
    /// Inclusive lower bound on the owning transaction's date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the owning transaction's date.
    pub date_to: Option<NaiveDate>,
    /// Only entries whose owning transaction is currently posted.
    pub posted_only: bool,
    /// Restrict to one transaction number.
    pub transaction_number: Option<String>,
}

/// A stored entry enriched with owning-transaction facts needed by queries.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// The ledger entry.
    pub entry: LedgerEntry,
    /// The owning transaction's date.
    pub transaction_date: NaiveDate,
    /// Whether the owning transaction is currently posted.
    pub is_posted: bool,
}

/// Append/query collection of transactions and their entries.
///
/// The store never deletes; unposting only flips the posted flag. It
/// provides read-your-writes consistency for a single caller.
pub trait LedgerStore: Send + Sync {
    /// Appends or replaces a transaction together with its entries.
    ///
    /// # Errors
    ///
    /// Implementations may fail on storage-level problems; the in-memory
    /// store is infallible here.
    fn append(&self, transaction: &Transaction) -> Result<(), LedgerError>;

    /// Updates the posted flag of a stored transaction.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the transaction was never appended.
    fn set_posted(
        &self,
        id: TransactionId,
        is_posted: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<(), LedgerError>;

    /// Finds a stored transaction by its identifier.
    fn find_by_id(&self, id: TransactionId) -> Option<Transaction>;

    /// Finds a stored transaction by its assigned number.
    fn find_by_number(&self, number: &str) -> Option<Transaction>;

    /// Returns the entries matching the filter, in insertion order.
    fn entries_matching(&self, filter: &EntryFilter) -> Vec<EntryRecord>;
}

/// In-memory ledger store.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    transactions: RwLock<TransactionMap>,
}

/// Transactions keyed by id, with insertion order preserved for queries.
#[derive(Debug, Default)]
struct TransactionMap {
    order: Vec<TransactionId>,
    by_id: HashMap<TransactionId, Transaction>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    /// Returns true if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn append(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut map = self
            .transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if !map.by_id.contains_key(&transaction.id) {
            map.order.push(transaction.id);
        }
        map.by_id.insert(transaction.id, transaction.clone());
        Ok(())
    }

    fn set_posted(
        &self,
        id: TransactionId,
        is_posted: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let mut map = self
            .transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let transaction = map
            .by_id
            .get_mut(&id)
            .ok_or_else(|| LedgerError::Internal(format!("transaction {id} not in store")))?;

        transaction.is_posted = is_posted;
        transaction.updated_at = updated_at;
        Ok(())
    }

    fn find_by_id(&self, id: TransactionId) -> Option<Transaction> {
        let map = self
            .transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.by_id.get(&id).cloned()
    }

    fn find_by_number(&self, number: &str) -> Option<Transaction> {
        let map = self
            .transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        map.order
            .iter()
            .filter_map(|id| map.by_id.get(id))
            .find(|t| t.transaction_number.as_deref() == Some(number))
            .cloned()
    }

    fn entries_matching(&self, filter: &EntryFilter) -> Vec<EntryRecord> {
        let map = self
            .transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = Vec::new();
        for transaction in map.order.iter().filter_map(|id| map.by_id.get(id)) {
            if filter.posted_only && !transaction.is_posted {
                continue;
            }
            if let Some(from) = filter.date_from {
                if transaction.transaction_date < from {
                    continue;
                }
            }
            if let Some(to) = filter.date_to {
                if transaction.transaction_date > to {
                    continue;
                }
            }
            if let Some(number) = &filter.transaction_number {
                if transaction.transaction_number.as_deref() != Some(number.as_str()) {
                    continue;
                }
            }

            for entry in &transaction.entries {
                if let Some(code) = &filter.account_code {
                    if &entry.account_code != code {
                        continue;
                    }
                }
                records.push(EntryRecord {
                    entry: entry.clone(),
                    transaction_date: transaction.transaction_date,
                    is_posted: transaction.is_posted,
                });
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontor_core::ledger::EntryType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(day: u32, amount: rust_decimal::Decimal) -> Transaction {
        let mut txn = Transaction::new(date(2020, 1, day), "Sale");
        txn.transaction_number = Some(format!("TXN-{day}"));
        txn.is_posted = true;
        txn.add_entry("1000", EntryType::Debit, amount);
        txn.add_entry("4000", EntryType::Credit, amount);
        txn
    }

    #[test]
    fn test_append_and_find() {
        let store = MemoryLedgerStore::new();
        let txn = sale(10, dec!(100));
        store.append(&txn).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(txn.id).is_some());
        assert!(store.find_by_number("TXN-10").is_some());
        assert!(store.find_by_number("TXN-99").is_none());
    }

    #[test]
    fn test_append_is_upsert() {
        let store = MemoryLedgerStore::new();
        let mut txn = sale(10, dec!(100));
        store.append(&txn).unwrap();

        txn.description = "Amended sale".to_string();
        store.append(&txn).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(txn.id).unwrap().description, "Amended sale");
    }

    #[test]
    fn test_set_posted() {
        let store = MemoryLedgerStore::new();
        let txn = sale(10, dec!(100));
        store.append(&txn).unwrap();

        store.set_posted(txn.id, false, Utc::now()).unwrap();
        assert!(!store.find_by_id(txn.id).unwrap().is_posted);

        assert!(matches!(
            store.set_posted(TransactionId::new(), true, Utc::now()),
            Err(LedgerError::Internal(_))
        ));
    }

    #[test]
    fn test_entry_filters() {
        let store = MemoryLedgerStore::new();
        store.append(&sale(5, dec!(50))).unwrap();
        store.append(&sale(20, dec!(70))).unwrap();

        let mut unposted = sale(25, dec!(30));
        unposted.is_posted = false;
        store.append(&unposted).unwrap();

        // Account filter
        let filter = EntryFilter {
            account_code: Some("1000".to_string()),
            ..EntryFilter::default()
        };
        assert_eq!(store.entries_matching(&filter).len(), 3);

        // Date range
        let filter = EntryFilter {
            date_from: Some(date(2020, 1, 10)),
            date_to: Some(date(2020, 1, 22)),
            ..EntryFilter::default()
        };
        assert_eq!(store.entries_matching(&filter).len(), 2);

        // Posted only
        let filter = EntryFilter {
            posted_only: true,
            ..EntryFilter::default()
        };
        assert_eq!(store.entries_matching(&filter).len(), 4);

        // Transaction number
        let filter = EntryFilter {
            transaction_number: Some("TXN-20".to_string()),
            ..EntryFilter::default()
        };
        let records = store.entries_matching(&filter);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.transaction_date == date(2020, 1, 20)));
    }
}
