//! Tabular views shared by the log viewers and dashboards.
//!
//! A [`Table`] is already formatted: every cell is the text the user sees.
//! The same cells feed the terminal rendering, the JSON output and the CSV
//! export, so the three can never disagree.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// A header row plus data rows of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row. Short rows are padded with empty cells and long
    /// rows truncated so every row matches the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Column names in display order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as comma-separated values, header row first.
    ///
    /// Records end with the platform's native line ending.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let terminator = if cfg!(windows) {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(terminator)
            .from_writer(writer);

        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        debug!("Wrote {} CSV rows", self.rows.len());
        Ok(())
    }

    /// The CSV serialization as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if CSV encoding fails.
    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
    }

    /// Render as an aligned text grid for the terminal.
    #[must_use]
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, &self.columns, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> Table {
        let mut table = Table::new(["Date", "Equipment", "Remarks"]);
        table.push_row(vec![
            "2024-01-15".to_string(),
            "Port-01".to_string(),
            "belt, worn".to_string(),
        ]);
        table.push_row(vec![
            "2024-01-16".to_string(),
            "Port-02".to_string(),
            "said \"ok\"".to_string(),
        ]);
        table
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let mut table = Table::new(["a", "b", "c"]);
        table.push_row(vec!["1".to_string()]);
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = create_test_table().to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Date,Equipment,Remarks"));
        assert_eq!(lines.next(), Some("2024-01-15,Port-01,\"belt, worn\""));
        assert_eq!(lines.next(), Some("2024-01-16,Port-02,\"said \"\"ok\"\"\""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_round_trip() {
        let table = create_test_table();
        let csv = table.to_csv().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(ToString::to_string).collect())
            .collect();

        assert_eq!(headers, table.columns());
        assert_eq!(rows, table.rows());
    }

    #[test]
    fn test_csv_empty_table_has_header() {
        let table = Table::new(["Date", "Equipment"]);
        assert_eq!(table.to_csv().unwrap().trim_end(), "Date,Equipment");
    }

    #[test]
    fn test_render_aligns_columns() {
        let rendered = create_test_table().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date        Equipment  Remarks"));
        assert!(lines[1].starts_with("----------  ---------"));
        assert!(lines[2].starts_with("2024-01-15  Port-01    belt, worn"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(create_test_table()).unwrap();
        assert_eq!(json["columns"][1], "Equipment");
        assert_eq!(json["rows"][1][0], "2024-01-16");
    }
}
