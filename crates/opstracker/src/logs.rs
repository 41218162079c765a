//! Log viewers and CSV export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::audit::AuditStore;
use crate::checklist::ITEMS;
use crate::error::{Error, Result};
use crate::maintenance::MaintenanceStore;
use crate::table::Table;

/// Shown instead of an empty maintenance log.
pub const NO_MAINTENANCE_RECORDS: &str = "No maintenance records yet.";

/// Shown instead of an empty audit log.
pub const NO_AUDIT_RECORDS: &str = "No audit records yet.";

/// What a log tab displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogView {
    /// The store is empty; show this message.
    Empty(&'static str),
    /// The store's displayed columns.
    Table(Table),
}

impl LogView {
    fn from_table(table: Table, empty: &'static str) -> Self {
        if table.is_empty() {
            Self::Empty(empty)
        } else {
            Self::Table(table)
        }
    }
}

/// Maintenance log columns: all five record fields.
#[must_use]
pub fn maintenance_table(store: &MaintenanceStore) -> Table {
    let mut table = Table::new(["Date", "Equipment", "Technician", "Activity", "Remarks"]);
    for record in store.records() {
        table.push_row(vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.equipment.clone(),
            record.technician.clone(),
            record.activity.to_string(),
            record.remarks.clone(),
        ]);
    }
    table
}

/// Audit log columns: the base fields and one status column per item.
/// Remarks are not displayed or exported.
#[must_use]
pub fn audit_table(store: &AuditStore) -> Table {
    let columns = ["Date", "Equipment", "Auditor", "Compliance Score"]
        .into_iter()
        .map(String::from)
        .chain(ITEMS.iter().map(|item| item.status_column()));
    let mut table = Table::new(columns);

    for record in store.records() {
        let mut row = vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.equipment.clone(),
            record.auditor.clone(),
            format!("{:?}", record.compliance_score),
        ];
        row.extend(
            record
                .statuses()
                .iter()
                .map(|passed| String::from(if *passed { "True" } else { "False" })),
        );
        table.push_row(row);
    }
    table
}

/// The maintenance "Logs" tab.
#[must_use]
pub fn maintenance_log(store: &MaintenanceStore) -> LogView {
    LogView::from_table(maintenance_table(store), NO_MAINTENANCE_RECORDS)
}

/// The audit "Audit Logs" tab.
#[must_use]
pub fn audit_log(store: &AuditStore) -> LogView {
    LogView::from_table(audit_table(store), NO_AUDIT_RECORDS)
}

/// JSON body of a log tab.
#[derive(Debug, Serialize)]
struct LogJson<'a> {
    columns: &'a [String],
    rows: &'a [Vec<String>],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// Pretty JSON of a log tab: `columns` and `rows`, plus the `empty`
/// message when there are no rows.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn log_json(table: &Table, empty: &'static str) -> Result<String> {
    let body = LogJson {
        columns: table.columns(),
        rows: table.rows(),
        message: table.is_empty().then_some(empty),
    };
    Ok(serde_json::to_string_pretty(&body)?)
}

/// Write `table` as CSV to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn export_csv(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let file = File::create(path)?;
    table.write_csv(BufWriter::new(file))?;
    info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
