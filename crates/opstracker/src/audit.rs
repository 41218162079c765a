//! 6S audit records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checklist::{self, ChecklistItem, ITEMS, ITEM_COUNT};
use crate::store::{Dated, Store};

/// Outcome of one checklist item within an audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    /// Whether the item passed inspection.
    pub passed: bool,
    /// Optional free-text remark.
    pub remark: String,
}

/// A submitted 6S audit.
///
/// The compliance score is computed once, when the record is built, and kept
/// as-is. It is never re-derived from `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Day of the audit.
    pub date: NaiveDate,
    /// Equipment or workstation identifier, free text.
    pub equipment: String,
    /// Auditor name, free text.
    pub auditor: String,
    /// Percentage of items passed at submission time.
    pub compliance_score: f64,
    /// Per-item results, indexed like [`ITEMS`].
    pub results: [ItemResult; ITEM_COUNT],
}

impl AuditRecord {
    /// Build a record, scoring `results` at this instant.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        equipment: String,
        auditor: String,
        results: [ItemResult; ITEM_COUNT],
    ) -> Self {
        let compliance_score = checklist::compliance_score(&statuses_of(&results));
        Self {
            date,
            equipment,
            auditor,
            compliance_score,
            results,
        }
    }

    /// Pass/fail flag of every item, indexed like [`ITEMS`].
    #[must_use]
    pub fn statuses(&self) -> [bool; ITEM_COUNT] {
        statuses_of(&self.results)
    }

    /// Items that did not pass, in checklist order.
    pub fn failed_items(&self) -> impl Iterator<Item = &'static ChecklistItem> + '_ {
        ITEMS
            .iter()
            .zip(&self.results)
            .filter(|(_, result)| !result.passed)
            .map(|(item, _)| item)
    }
}

fn statuses_of(results: &[ItemResult; ITEM_COUNT]) -> [bool; ITEM_COUNT] {
    std::array::from_fn(|i| results[i].passed)
}

impl Dated for AuditRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The session's audit log.
pub type AuditStore = Store<AuditRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    fn results_passing(count: usize) -> [ItemResult; ITEM_COUNT] {
        std::array::from_fn(|i| ItemResult {
            passed: i < count,
            remark: String::new(),
        })
    }

    fn create_test_audit(passing: usize) -> AuditRecord {
        AuditRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            "Workstation-A".to_string(),
            "John Smith".to_string(),
            results_passing(passing),
        )
    }

    #[test]
    fn test_score_computed_on_creation() {
        assert!((create_test_audit(17).compliance_score - 100.0).abs() < f64::EPSILON);
        assert!(create_test_audit(0).compliance_score.abs() < f64::EPSILON);
        assert_eq!(format!("{:.1}", create_test_audit(9).compliance_score), "52.9");
    }

    #[test]
    fn test_score_is_not_rederived() {
        let mut record = create_test_audit(17);
        record.results[0].passed = false;
        // The stored score reflects submission time, not the current flags.
        assert!((record.compliance_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(record.statuses().iter().filter(|s| **s).count(), 16);
    }

    #[test]
    fn test_failed_items() {
        let record = create_test_audit(15);
        let keys: Vec<_> = record.failed_items().map(|item| item.key).collect();
        assert_eq!(keys, vec!["item_16", "item_17"]);
    }

    #[test]
    fn test_remarks_are_kept() {
        let mut results = results_passing(3);
        results[5].remark = "mat missing".to_string();
        let record = AuditRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            String::new(),
            String::new(),
            results,
        );
        assert_eq!(record.results[5].remark, "mat missing");
        assert!(record.equipment.is_empty());
    }

    #[test]
    fn test_audit_store_append() {
        let mut store = AuditStore::new();
        store.append(create_test_audit(4));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].auditor, "John Smith");
    }
}
