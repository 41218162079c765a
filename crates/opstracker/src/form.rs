//! Entry forms.
//!
//! A form holds a draft. [`MaintenanceForm::fill`] and [`AuditForm::fill`]
//! prompt for every field on a line-oriented terminal; `submit` turns the
//! draft into a record, appends it and leaves a fresh default draft behind.
//! No field is required and no cross-field check is made.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::{info, trace};

use crate::audit::{AuditRecord, AuditStore, ItemResult};
use crate::checklist::{ITEMS, ITEM_COUNT};
use crate::error::{Error, Result};
use crate::maintenance::{ActivityKind, MaintenanceRecord, MaintenanceStore};

/// Parse a form date. Blank input means "use the default".
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] for anything other than blank or `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::invalid_date(trimmed))
}

/// Parse a checkbox answer. Blank input leaves the box unchecked.
///
/// # Errors
///
/// Returns [`Error::InvalidAnswer`] for anything other than blank, y/yes or n/no.
pub fn parse_yes_no(input: &str) -> Result<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "" | "n" | "no" => Ok(false),
        other => Err(Error::invalid_answer(other)),
    }
}

/// Field values of a maintenance entry before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceDraft {
    /// Chosen date; `None` submits as today.
    pub date: Option<NaiveDate>,
    /// Equipment ID/Name.
    pub equipment: String,
    /// Technician name.
    pub technician: String,
    /// Selected activity type.
    pub activity: ActivityKind,
    /// Free-text remarks.
    pub remarks: String,
}

/// The "Add Activity" form.
#[derive(Debug, Default)]
pub struct MaintenanceForm {
    draft: MaintenanceDraft,
}

impl MaintenanceForm {
    /// Create a form with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft values.
    #[must_use]
    pub fn draft(&self) -> &MaintenanceDraft {
        &self.draft
    }

    /// Mutable access to the draft, for filling fields directly.
    pub fn draft_mut(&mut self) -> &mut MaintenanceDraft {
        &mut self.draft
    }

    /// Prompt for every field in turn.
    ///
    /// Unparseable dates or activity types are reported and asked again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormAbandoned`] if input ends before the form is
    /// complete, or an I/O error from the terminal.
    pub fn fill<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        writeln!(output, "Log New Maintenance Activity")?;
        self.draft.date = ask(input, output, "Date (YYYY-MM-DD, blank for today)", parse_date)?;
        self.draft.equipment = prompt(input, output, "Equipment ID/Name")?;
        self.draft.technician = prompt(input, output, "Technician")?;
        let options: Vec<String> = ActivityKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| format!("{}) {kind}", i + 1))
            .collect();
        self.draft.activity = ask(
            input,
            output,
            &format!("Activity Type [{}]", options.join(" ")),
            |s| {
                if s.trim().is_empty() {
                    Ok(ActivityKind::default())
                } else {
                    s.parse()
                }
            },
        )?;
        self.draft.remarks = prompt(input, output, "Remarks")?;
        Ok(())
    }

    /// Append the draft to `store` and reset the form.
    pub fn submit<'s>(
        &mut self,
        store: &'s mut MaintenanceStore,
        today: NaiveDate,
    ) -> &'s MaintenanceRecord {
        let draft = std::mem::take(&mut self.draft);
        let record = store.append(MaintenanceRecord {
            date: draft.date.unwrap_or(today),
            equipment: draft.equipment,
            technician: draft.technician,
            activity: draft.activity,
            remarks: draft.remarks,
        });
        info!(
            "Logged {} on '{}' dated {}",
            record.activity, record.equipment, record.date
        );
        record
    }
}

/// Field values of an audit before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditDraft {
    /// Chosen date; `None` submits as today.
    pub date: Option<NaiveDate>,
    /// Equipment/Workstation ID.
    pub equipment: String,
    /// Auditor name.
    pub auditor: String,
    /// Checkbox and remark per checklist item, indexed like [`ITEMS`].
    pub results: [ItemResult; ITEM_COUNT],
}

/// The "Conduct Audit" form.
#[derive(Debug, Default)]
pub struct AuditForm {
    draft: AuditDraft,
}

impl AuditForm {
    /// Create a form with every box unchecked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft values.
    #[must_use]
    pub fn draft(&self) -> &AuditDraft {
        &self.draft
    }

    /// Mutable access to the draft, for filling fields directly.
    pub fn draft_mut(&mut self) -> &mut AuditDraft {
        &mut self.draft
    }

    /// Prompt for the header fields, then each checklist item by category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormAbandoned`] if input ends before the form is
    /// complete, or an I/O error from the terminal.
    pub fn fill<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        writeln!(output, "Log a New 6S Audit")?;
        self.draft.date = ask(input, output, "Date (YYYY-MM-DD, blank for today)", parse_date)?;
        self.draft.equipment = prompt(input, output, "Equipment/Workstation ID")?;
        self.draft.auditor = prompt(input, output, "Auditor Name")?;
        writeln!(output, "Answer y if the item passes inspection.")?;

        let mut category = None;
        for (index, item) in ITEMS.iter().enumerate() {
            if category != Some(item.category) {
                writeln!(output, "[{}]", item.category)?;
                category = Some(item.category);
            }
            let passed = ask(input, output, &format!("  {} (y/n)", item.description), parse_yes_no)?;
            let remark = prompt(input, output, "    Remarks")?;
            self.draft.results[index] = ItemResult { passed, remark };
        }
        Ok(())
    }

    /// Score the draft, append it to `store` and reset the form.
    pub fn submit<'s>(&mut self, store: &'s mut AuditStore, today: NaiveDate) -> &'s AuditRecord {
        let draft = std::mem::take(&mut self.draft);
        let record = store.append(AuditRecord::new(
            draft.date.unwrap_or(today),
            draft.equipment,
            draft.auditor,
            draft.results,
        ));
        info!(
            "Logged audit of '{}' dated {} scoring {:.1}%",
            record.equipment, record.date, record.compliance_score
        );
        record
    }
}

/// Read one line without its line ending, or `None` at end of input.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub(crate) fn read_text_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Read one line for `label`. End of input abandons the form.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;
    let Some(value) = read_text_line(input)? else {
        writeln!(output)?;
        return Err(Error::form_abandoned(label.trim()));
    };
    trace!("{} = {:?}", label.trim(), value);
    Ok(value)
}

/// Ask until `parse` accepts the answer. Input errors are shown and retried.
fn ask<T, R, W, F>(input: &mut R, output: &mut W, label: &str, parse: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T>,
{
    loop {
        let raw = prompt(input, output, label)?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_input_error() => writeln!(output, "{err}")?,
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("y").unwrap());
        assert!(parse_yes_no("YES").unwrap());
        assert!(!parse_yes_no("").unwrap());
        assert!(!parse_yes_no("n").unwrap());
        assert!(parse_yes_no("maybe").is_err());
    }

    #[test]
    fn test_maintenance_fill_and_submit() {
        let mut input = Cursor::new("2024-05-02\nPort-01\nJane Doe\n2\nbelt replaced\n");
        let mut output = Vec::new();
        let mut form = MaintenanceForm::new();
        form.fill(&mut input, &mut output).unwrap();

        let mut store = MaintenanceStore::new();
        let record = form.submit(&mut store, today()).clone();

        assert_eq!(store.len(), 1);
        assert_eq!(
            record,
            MaintenanceRecord {
                date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                equipment: "Port-01".to_string(),
                technician: "Jane Doe".to_string(),
                activity: ActivityKind::Repair,
                remarks: "belt replaced".to_string(),
            }
        );
        assert_eq!(form.draft(), &MaintenanceDraft::default());
    }

    #[test]
    fn test_maintenance_defaults_accept_blanks() {
        let mut input = Cursor::new("\n\n\n\n\n");
        let mut output = Vec::new();
        let mut form = MaintenanceForm::new();
        form.fill(&mut input, &mut output).unwrap();

        let mut store = MaintenanceStore::new();
        let record = form.submit(&mut store, today());
        assert_eq!(record.date, today());
        assert_eq!(record.activity, ActivityKind::Inspection);
        assert!(record.equipment.is_empty());
    }

    #[test]
    fn test_maintenance_reprompts_bad_values() {
        let mut input = Cursor::new("01/05/2024\n2024-05-01\nPort-09\nAl\nPainting\ncleaning\n\n");
        let mut output = Vec::new();
        let mut form = MaintenanceForm::new();
        form.fill(&mut input, &mut output).unwrap();

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("invalid date '01/05/2024'"));
        assert!(shown.contains("invalid activity type 'Painting'"));
        assert_eq!(form.draft().activity, ActivityKind::Cleaning);
        assert_eq!(form.draft().date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_read_text_line_replaces_invalid_utf8() {
        let mut input = Cursor::new(b"caf\xe9\r\nnext\nlast".to_vec());
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("caf\u{fffd}"));
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("next"));
        assert_eq!(read_text_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_text_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_maintenance_accepts_non_utf8_text() {
        let mut input = Cursor::new(b"2024-05-02\nPort-01\nRen\xe9\n1\n\n".to_vec());
        let mut output = Vec::new();
        let mut form = MaintenanceForm::new();
        form.fill(&mut input, &mut output).unwrap();
        assert_eq!(form.draft().technician, "Ren\u{fffd}");
        assert_eq!(form.draft().activity, ActivityKind::Inspection);
    }

    #[test]
    fn test_maintenance_abandoned_on_eof() {
        let mut input = Cursor::new("2024-05-01\nPort-01\n");
        let mut output = Vec::new();
        let mut form = MaintenanceForm::new();
        let err = form.fill(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, Error::FormAbandoned { .. }));
        assert!(err.to_string().contains("Technician"));
    }

    fn audit_script(passes: usize) -> String {
        let mut script = String::from("2024-06-01\nWS-A\nJohn Smith\n");
        for i in 0..ITEM_COUNT {
            script.push_str(if i < passes { "y\n" } else { "n\n" });
            script.push_str(&format!("note {}\n", i + 1));
        }
        script
    }

    #[test]
    fn test_audit_fill_and_submit() {
        let mut input = Cursor::new(audit_script(9));
        let mut output = Vec::new();
        let mut form = AuditForm::new();
        form.fill(&mut input, &mut output).unwrap();

        let mut store = AuditStore::new();
        let record = form.submit(&mut store, today()).clone();

        assert_eq!(store.len(), 1);
        assert_eq!(record.equipment, "WS-A");
        assert_eq!(record.auditor, "John Smith");
        assert_eq!(format!("{:.1}", record.compliance_score), "52.9");
        assert!(record.results[8].passed);
        assert!(!record.results[9].passed);
        assert_eq!(record.results[16].remark, "note 17");
        assert_eq!(form.draft(), &AuditDraft::default());

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("[Set in Order]"));
        assert!(shown.contains("Tools in designated locations (y/n)"));
    }

    #[test]
    fn test_audit_direct_draft() {
        let mut form = AuditForm::new();
        form.draft_mut().equipment = "WS-Z".to_string();
        for result in &mut form.draft_mut().results {
            result.passed = true;
        }
        let mut store = AuditStore::new();
        let record = form.submit(&mut store, today());
        assert!((record.compliance_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(record.date, today());
    }
}
