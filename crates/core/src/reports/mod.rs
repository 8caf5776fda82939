//! Trial balance, journal and audit trail aggregation.

pub mod service;
pub mod types;

pub use service::ReportService;
pub use types::{
    AuditTrail, JournalReport, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
