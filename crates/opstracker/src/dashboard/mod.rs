//! Date-filtered dashboards.
//!
//! Every dashboard goes through the same gate before any aggregation runs:
//! an empty store, an inverted date range and an empty selection each stop
//! rendering with a message. Aggregation only ever sees a non-empty slice.

pub mod aggregate;
pub mod audit;
pub mod maintenance;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{Dated, Store};

pub use audit::{AuditSummary, FailingItem};
pub use maintenance::MaintenanceSummary;

/// Shown when the store has no records at all.
pub const NO_DATA_MESSAGE: &str = "No data available to generate dashboard.";

/// Shown when no record falls inside the selected range.
pub const EMPTY_RANGE_MESSAGE: &str = "No data in the selected date range.";

/// An inclusive range of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range covering `start` through `end`, both included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies in the range, ends included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// What a dashboard panel shows for a given store and date selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView<S> {
    /// The store has no records.
    NoData,
    /// The requested start is after the requested end.
    InvalidRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },
    /// The range is valid but selects nothing.
    EmptyRange {
        /// The range that was applied.
        range: DateRange,
    },
    /// Computed metrics and charts.
    Ready {
        /// The computed summary.
        summary: S,
    },
}

impl<S> DashboardView<S> {
    /// Filter `store` by the requested range and summarize the selection.
    ///
    /// A missing `start` or `end` defaults to the earliest or latest record
    /// date. `summarize` is only called with a non-empty selection.
    pub fn build<T, F>(
        store: &Store<T>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        summarize: F,
    ) -> Self
    where
        T: Dated,
        F: FnOnce(DateRange, &[&T]) -> S,
    {
        let Some((first, last)) = store.date_bounds() else {
            return Self::NoData;
        };
        let start = start.unwrap_or(first);
        let end = end.unwrap_or(last);

        let range = match DateRange::new(start, end) {
            Ok(range) => range,
            Err(err) => {
                debug!("Rejected dashboard range: {err}");
                return Self::InvalidRange { start, end };
            }
        };

        let selected = store.in_range(range);
        if selected.is_empty() {
            return Self::EmptyRange { range };
        }
        Self::Ready {
            summary: summarize(range, &selected),
        }
    }

    /// The informational or error message for a panel with nothing to show.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NoData => Some(NO_DATA_MESSAGE.to_string()),
            Self::InvalidRange { start, end } => Some(
                Error::InvalidDateRange {
                    start: *start,
                    end: *end,
                }
                .to_string(),
            ),
            Self::EmptyRange { .. } => Some(EMPTY_RANGE_MESSAGE.to_string()),
            Self::Ready { .. } => None,
        }
    }

    /// The computed summary, if the panel has one.
    #[must_use]
    pub fn summary(&self) -> Option<&S> {
        match self {
            Self::Ready { summary } => Some(summary),
            _ => None,
        }
    }
}
