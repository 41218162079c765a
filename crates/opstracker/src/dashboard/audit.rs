//! 6S audit dashboard.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::aggregate::{self, Grid};
use super::{DashboardView, DateRange};
use crate::audit::{AuditRecord, AuditStore};
use crate::chart::{BarChart, Heatmap};
use crate::checklist::{ITEMS, ITEM_COUNT};

/// How many failing items the dashboard lists.
pub const TOP_FAILING: usize = 3;

/// Upper bound of the compliance bar chart's scale.
const SCORE_AXIS_MAX: f64 = 105.0;

/// A checklist item and how often it failed in the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailingItem {
    /// Checklist key, e.g. `item_7`.
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Number of selected audits where the item did not pass.
    pub failures: usize,
}

/// Metrics and aggregations over the selected audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditSummary {
    /// The applied date range.
    pub range: DateRange,
    /// Number of selected audits.
    pub total: usize,
    /// Mean of the stored compliance scores.
    pub average_score: f64,
    /// Most-failed items, most failures first.
    pub top_failing: Vec<FailingItem>,
    /// Mean score per equipment, equipment ascending.
    pub by_equipment: Vec<(String, f64)>,
    /// Mean score per equipment (rows) and audit day (columns).
    pub timeline: Grid<String, NaiveDate, Option<f64>>,
}

/// Failures per checklist item, indexed like [`ITEMS`].
#[must_use]
pub fn failure_counts(records: &[&AuditRecord]) -> [usize; ITEM_COUNT] {
    let mut counts = [0; ITEM_COUNT];
    for record in records {
        for (count, result) in counts.iter_mut().zip(&record.results) {
            if !result.passed {
                *count += 1;
            }
        }
    }
    counts
}

/// The `n` items with the most failures.
///
/// The sort is stable over checklist order, so ties keep declaration order.
#[must_use]
pub fn top_failing(counts: &[usize; ITEM_COUNT], n: usize) -> Vec<FailingItem> {
    let mut ranked: Vec<FailingItem> = ITEMS
        .iter()
        .zip(counts)
        .map(|(item, failures)| FailingItem {
            key: item.key,
            description: item.description,
            failures: *failures,
        })
        .collect();
    ranked.sort_by(|a, b| b.failures.cmp(&a.failures));
    ranked.truncate(n);
    ranked
}

impl AuditSummary {
    /// Summarize a non-empty selection.
    #[must_use]
    pub fn compute(range: DateRange, records: &[&AuditRecord]) -> Self {
        let summary = Self {
            range,
            total: records.len(),
            average_score: aggregate::mean(records.iter().map(|r| r.compliance_score))
                .unwrap_or_default(),
            top_failing: top_failing(&failure_counts(records), TOP_FAILING),
            by_equipment: aggregate::mean_by(
                records
                    .iter()
                    .map(|r| (r.equipment.clone(), r.compliance_score)),
            ),
            timeline: aggregate::pivot_mean(
                records
                    .iter()
                    .map(|r| (r.equipment.clone(), r.date, r.compliance_score)),
            ),
        };
        debug!(
            "Audit summary: {} audits, average {:.1}%",
            summary.total, summary.average_score
        );
        summary
    }

    /// Render metrics, the failing-items list and charts as text.
    #[must_use]
    pub fn render(&self, chart_width: usize) -> String {
        let mut out = format!(
            "Total Audits: {}   Avg. Compliance Score: {:.1}%\n\n",
            self.total, self.average_score
        );

        out.push_str("Top 3 Failing Items\n");
        for (i, item) in self.top_failing.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} (Failed {} times)\n",
                i + 1,
                item.description,
                item.failures
            ));
        }
        out.push('\n');

        let chart = BarChart {
            title: "Average Compliance by Equipment".to_string(),
            bars: self.by_equipment.clone(),
            scale_max: Some(SCORE_AXIS_MAX),
            precision: 1,
        };
        out.push_str(&chart.render(chart_width));
        out.push('\n');

        if self.timeline.is_empty() {
            out.push_str("Not enough data to display a compliance heatmap.\n");
        } else {
            let heatmap = Heatmap {
                title: "Compliance Score by Equipment Over Time".to_string(),
                rows: self.timeline.rows.clone(),
                columns: self
                    .timeline
                    .columns
                    .iter()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .collect(),
                cells: self.timeline.cells.clone(),
                precision: 1,
            };
            out.push_str(&heatmap.render());
        }
        out
    }
}

/// Build the audit dashboard for the requested range.
#[must_use]
pub fn dashboard(
    store: &AuditStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DashboardView<AuditSummary> {
    DashboardView::build(store, start, end, AuditSummary::compute)
}
