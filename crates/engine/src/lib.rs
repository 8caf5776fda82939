//! Posting engine, ledger store and reporting services for Kontor.
//!
//! This crate is the operational layer over the pure domain in
//! `kontor-core`. It provides:
//!
//! - `store` - append/query ledger store with an in-memory implementation
//! - `sequencer` - atomic, gap-free document number issuing
//! - `fiscal` - fiscal period registry with open/close gating
//! - `accounts` - chart of accounts catalog
//! - `posting` - the transaction posting state machine
//! - `balance` - point-in-time balances, turnovers and trial balances
//! - `journal` - journal queries, reports and audit trails
//! - `document` - business document to transaction translation
//! - `module` - the accounting module facade exposed to the rest of the ERP

pub mod accounts;
pub mod activity;
pub mod balance;
pub mod document;
pub mod fiscal;
pub mod journal;
pub mod keyed_lock;
pub mod module;
pub mod posting;
pub mod sequencer;
pub mod store;

pub use accounts::{AccountCatalog, MemoryAccountCatalog};
pub use activity::{ActivityRecord, ActivitySink, MemoryActivityLog, NoopActivity};
pub use balance::BalanceCalculator;
pub use document::{DocumentLine, SourceDocument, transaction_from_document};
pub use fiscal::{FiscalPeriods, MemoryFiscalPeriods};
pub use journal::{JournalQueryOptions, JournalService, JournalSort};
pub use keyed_lock::KeyedLock;
pub use module::AccountingModule;
pub use posting::PostingEngine;
pub use sequencer::{MemorySequencer, Sequencer};
pub use store::{EntryFilter, EntryRecord, LedgerStore, MemoryLedgerStore};
