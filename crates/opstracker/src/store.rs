//! Append-only, session-scoped record storage.
//!
//! A [`Store`] is a plain ordered collection. Records go in through
//! [`Store::append`] and never change or leave afterwards; the store is
//! dropped together with the [`Session`](crate::session::Session) that owns it.

use chrono::NaiveDate;
use tracing::debug;

use crate::dashboard::DateRange;

/// A record that carries a calendar date.
pub trait Dated {
    /// The calendar day the record belongs to.
    fn date(&self) -> NaiveDate;
}

/// In-memory, append-only table of records.
#[derive(Debug, Clone)]
pub struct Store<T> {
    records: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> Store<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a reference to it as stored.
    pub fn append(&mut self, record: T) -> &T {
        let index = self.records.len();
        self.records.push(record);
        debug!("Store now holds {} records", self.records.len());
        &self.records[index]
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Dated> Store<T> {
    /// Records dated within `range` (both ends inclusive), in insertion order.
    #[must_use]
    pub fn in_range(&self, range: DateRange) -> Vec<&T> {
        let selected: Vec<&T> = self
            .records
            .iter()
            .filter(|record| range.contains(record.date()))
            .collect();
        debug!(
            "Selected {} of {} records between {} and {}",
            selected.len(),
            self.records.len(),
            range.start(),
            range.end()
        );
        selected
    }

    /// Earliest and latest record dates, or `None` for an empty store.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(Dated::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}
