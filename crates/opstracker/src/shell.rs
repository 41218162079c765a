//! Interactive session shell.
//!
//! Each input line is one [`SessionCommand`]. Entry forms read their fields
//! from the same input, so a whole session can be replayed from a script.
//! All records are dropped with the [`Session`] when the shell returns.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::cli::{SessionCommand, SessionLine};
use crate::config::Config;
use crate::dashboard::{audit as audit_dashboard, maintenance as maintenance_dashboard};
use crate::error::{Error, Result};
use crate::form::{read_text_line, AuditForm, MaintenanceForm};
use crate::logs::{self, LogView};
use crate::session::{Module, Session};
use crate::table::Table;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A session bound to an input and an output stream.
#[derive(Debug)]
pub struct Shell<'c, R, W> {
    session: Session,
    config: &'c Config,
    input: R,
    output: W,
    maintenance_form: MaintenanceForm,
    audit_form: AuditForm,
    today: Option<NaiveDate>,
}

impl<'c, R: BufRead, W: Write> Shell<'c, R, W> {
    /// Create a shell with a fresh session on `module`.
    #[must_use]
    pub fn new(config: &'c Config, module: Module, input: R, output: W) -> Self {
        Self {
            session: Session::new(module),
            config,
            input,
            output,
            maintenance_form: MaintenanceForm::new(),
            audit_form: AuditForm::new(),
            today: None,
        }
    }

    /// Fix the date that blank form dates resolve to.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The session being driven.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// Unknown commands and bad arguments are reported and the loop goes on.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn run(&mut self) -> Result<()> {
        self.show_module()?;
        writeln!(self.output, "Type 'help' for the list of commands.")?;

        loop {
            write!(self.output, "opstrack[{}]> ", self.session.active())?;
            self.output.flush()?;

            let Some(line) = read_text_line(&mut self.input)? else {
                writeln!(self.output)?;
                break;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let command = match SessionLine::parse_line(line) {
                Ok(command) => command,
                Err(err) => {
                    write!(self.output, "{}", err.render())?;
                    continue;
                }
            };
            debug!("Session command: {:?}", command);

            if self.execute(command)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Module { module } => {
                self.session.select(module.into());
                self.show_module()?;
            }
            SessionCommand::Add => return self.add(),
            SessionCommand::Logs { json } => self.logs(json)?,
            SessionCommand::Export { output, stdout } => self.export(output, stdout)?,
            SessionCommand::Dashboard { start, end, json } => self.dashboard(start, end, json)?,
            SessionCommand::Checklist => {
                write!(self.output, "{}", crate::checklist::render_taxonomy())?;
            }
            SessionCommand::Status => self.status()?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn show_module(&mut self) -> Result<()> {
        let module = self.session.active();
        writeln!(self.output, "{}", module.title())?;
        writeln!(self.output, "{}", module.description())?;
        Ok(())
    }

    fn add(&mut self) -> Result<Flow> {
        let today = self.today();
        let filled = match self.session.active() {
            Module::Maintenance => self.maintenance_form.fill(&mut self.input, &mut self.output),
            Module::Audit => self.audit_form.fill(&mut self.input, &mut self.output),
        };

        match filled {
            Ok(()) => {}
            Err(err @ Error::FormAbandoned { .. }) => {
                warn!("{err}; draft discarded");
                writeln!(self.output, "Form discarded: {err}")?;
                return Ok(Flow::Quit);
            }
            Err(err) => return Err(err),
        }

        match self.session.active() {
            Module::Maintenance => {
                self.maintenance_form
                    .submit(&mut self.session.maintenance, today);
                writeln!(self.output, "Activity added successfully!")?;
            }
            Module::Audit => {
                let record = self.audit_form.submit(&mut self.session.audits, today);
                writeln!(
                    self.output,
                    "Audit submitted successfully! Compliance Score: {:.1}%",
                    record.compliance_score
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    fn table(&self) -> Table {
        match self.session.active() {
            Module::Maintenance => logs::maintenance_table(&self.session.maintenance),
            Module::Audit => logs::audit_table(&self.session.audits),
        }
    }

    fn empty_message(&self) -> &'static str {
        match self.session.active() {
            Module::Maintenance => logs::NO_MAINTENANCE_RECORDS,
            Module::Audit => logs::NO_AUDIT_RECORDS,
        }
    }

    fn logs(&mut self, json: bool) -> Result<()> {
        if json {
            let text = logs::log_json(&self.table(), self.empty_message())?;
            writeln!(self.output, "{text}")?;
            return Ok(());
        }

        let (heading, view) = match self.session.active() {
            Module::Maintenance => (
                "Maintenance Logs",
                logs::maintenance_log(&self.session.maintenance),
            ),
            Module::Audit => (
                "Historical Audit Logs",
                logs::audit_log(&self.session.audits),
            ),
        };
        writeln!(self.output, "{heading}")?;
        match view {
            LogView::Empty(message) => writeln!(self.output, "{message}")?,
            LogView::Table(table) => write!(self.output, "{table}")?,
        }
        Ok(())
    }

    fn export(&mut self, output: Option<PathBuf>, stdout: bool) -> Result<()> {
        let module = self.session.active();
        let table = self.table();
        if table.is_empty() {
            writeln!(self.output, "{} Nothing to export.", self.empty_message())?;
            return Ok(());
        }

        if stdout {
            write!(self.output, "{}", table.to_csv()?)?;
            return Ok(());
        }

        let path = output.unwrap_or_else(|| self.config.export_path(module));
        match logs::export_csv(&table, &path) {
            Ok(()) => writeln!(
                self.output,
                "Exported {} rows to {}",
                table.len(),
                path.display()
            )?,
            Err(err) => {
                warn!("Export to {} failed: {err}", path.display());
                writeln!(self.output, "Export failed: {err}")?;
            }
        }
        Ok(())
    }

    fn dashboard(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        json: bool,
    ) -> Result<()> {
        let width = self.config.display.chart_width;
        let (heading, json_text, message, body) = match self.session.active() {
            Module::Maintenance => {
                let view = maintenance_dashboard::dashboard(&self.session.maintenance, start, end);
                (
                    "Maintenance Dashboard",
                    json.then(|| serde_json::to_string_pretty(&view)).transpose()?,
                    view.message(),
                    view.summary().map(|s| (s.range, s.render(width))),
                )
            }
            Module::Audit => {
                let view = audit_dashboard::dashboard(&self.session.audits, start, end);
                (
                    "6S Audit Dashboard",
                    json.then(|| serde_json::to_string_pretty(&view)).transpose()?,
                    view.message(),
                    view.summary().map(|s| (s.range, s.render(width))),
                )
            }
        };

        if let Some(text) = json_text {
            writeln!(self.output, "{text}")?;
            return Ok(());
        }

        writeln!(self.output, "{heading}")?;
        if let Some(message) = message {
            writeln!(self.output, "{message}")?;
        }
        if let Some((range, text)) = body {
            writeln!(
                self.output,
                "Showing {} to {}\n",
                range.start(),
                range.end()
            )?;
            write!(self.output, "{text}")?;
        }
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        writeln!(self.output, "Module:              {}", self.session.active().title())?;
        writeln!(
            self.output,
            "Maintenance records: {}",
            self.session.record_count(Module::Maintenance)
        )?;
        writeln!(
            self.output,
            "Audit records:       {}",
            self.session.record_count(Module::Audit)
        )?;
        Ok(())
    }
}
