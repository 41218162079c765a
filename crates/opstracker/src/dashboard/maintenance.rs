//! Maintenance dashboard.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::aggregate::{self, Grid};
use super::{DashboardView, DateRange};
use crate::chart::{BarChart, Heatmap};
use crate::maintenance::{ActivityKind, MaintenanceRecord, MaintenanceStore};

/// Metrics and aggregations over the selected maintenance records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceSummary {
    /// The applied date range.
    pub range: DateRange,
    /// Number of selected records.
    pub total: usize,
    /// Selected records with activity `Inspection`.
    pub inspections: usize,
    /// Selected records with activity `Repair`.
    pub repairs: usize,
    /// Count per activity kind present, in order of first appearance.
    pub by_activity: Vec<(ActivityKind, usize)>,
    /// Count per equipment, in order of first appearance.
    pub by_equipment: Vec<(String, usize)>,
    /// Occurrence counts of equipment (rows) by activity name (columns),
    /// both ascending.
    pub matrix: Grid<String, &'static str, usize>,
}

impl MaintenanceSummary {
    /// Summarize a non-empty selection.
    #[must_use]
    pub fn compute(range: DateRange, records: &[&MaintenanceRecord]) -> Self {
        let count_kind = |kind: ActivityKind| records.iter().filter(|r| r.activity == kind).count();

        let summary = Self {
            range,
            total: records.len(),
            inspections: count_kind(ActivityKind::Inspection),
            repairs: count_kind(ActivityKind::Repair),
            by_activity: aggregate::count_by(records.iter().map(|r| r.activity)),
            by_equipment: aggregate::count_by(records.iter().map(|r| r.equipment.clone())),
            matrix: aggregate::crosstab(
                records
                    .iter()
                    .map(|r| (r.equipment.clone(), r.activity.name())),
            ),
        };
        debug!(
            "Maintenance summary: {} records, {} equipment",
            summary.total,
            summary.by_equipment.len()
        );
        summary
    }

    /// Render metrics, charts and the frequency matrix as text.
    #[must_use]
    pub fn render(&self, chart_width: usize) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Total Activities: {}   Inspections: {}   Repairs: {}\n\n",
            self.total, self.inspections, self.repairs
        ));
        out.push_str(&BarChart::counts("Activities by Type", &self.by_activity).render(chart_width));
        out.push('\n');
        out.push_str(
            &BarChart::counts("Activities per Equipment", &self.by_equipment).render(chart_width),
        );
        out.push('\n');
        if self.matrix.is_empty() {
            out.push_str("Not enough data to display a correlation matrix.\n");
        } else {
            out.push_str(&self.frequency_heatmap().render());
        }
        out
    }

    #[allow(clippy::cast_precision_loss)]
    fn frequency_heatmap(&self) -> Heatmap {
        Heatmap {
            title: "Equipment vs. Activity Frequency".to_string(),
            rows: self.matrix.rows.clone(),
            columns: self.matrix.columns.iter().map(ToString::to_string).collect(),
            cells: self
                .matrix
                .cells
                .iter()
                .map(|row| row.iter().map(|n| Some(*n as f64)).collect())
                .collect(),
            precision: 0,
        }
    }
}

/// Build the maintenance dashboard for the requested range.
#[must_use]
pub fn dashboard(
    store: &MaintenanceStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DashboardView<MaintenanceSummary> {
    DashboardView::build(store, start, end, MaintenanceSummary::compute)
}
