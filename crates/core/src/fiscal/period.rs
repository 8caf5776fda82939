//! Fiscal period types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use kontor_shared::types::FiscalPeriodId;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed, no posting or unposting allowed.
    Closed,
}

impl PeriodStatus {
    /// Returns true if the status allows posting.
    #[must_use]
    pub fn allows_posting(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A fiscal period with an inclusive date range.
///
/// Periods are configured not to overlap: any date is covered by at most one
/// period. Posting and unposting require the covering period to be open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Period code (e.g., "2020-01").
    pub code: String,
    /// Period name (e.g., "January 2020").
    pub name: String,
    /// Start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
    /// Actor that last changed the status.
    pub updated_by: Option<String>,
    /// When the period was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FiscalPeriod {
    /// Creates a new open period.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: FiscalPeriodId::new(),
            code: code.into(),
            name: name.into(),
            start_date,
            end_date,
            status: PeriodStatus::Open,
            updated_by: None,
            updated_at: Utc::now(),
        }
    }

    /// Returns true if transactions can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if this period's date range overlaps another's.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        date_ranges_overlap(self.start_date, self.end_date, other.start_date, other.end_date)
    }
}

/// Checks if two inclusive date ranges overlap.
///
/// Two ranges [a_start, a_end] and [b_start, b_end] overlap if:
/// a_start <= b_end AND a_end >= b_start
#[must_use]
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}
