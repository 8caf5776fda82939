//! Fiscal period model.

pub mod period;

pub use period::{FiscalPeriod, PeriodStatus, date_ranges_overlap};
