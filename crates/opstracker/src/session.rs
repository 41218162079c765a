//! Session context.
//!
//! A [`Session`] owns one maintenance store and one audit store for the
//! lifetime of a user's interaction. Nothing is shared between sessions and
//! nothing outlives one.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::AuditStore;
use crate::maintenance::MaintenanceStore;

/// The two record-keeping modules selectable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Equipment maintenance tracker.
    #[default]
    Maintenance,
    /// 6S audit tracker.
    Audit,
}

impl Module {
    /// Page title shown when the module is selected.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Maintenance => "Equipment Maintenance Tracker",
            Self::Audit => "Autostore 6S Audit Tracker",
        }
    }

    /// One-line description shown under the title.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Maintenance => {
                "Track maintenance activities, view logs, and monitor equipment performance."
            }
            Self::Audit => {
                "Conduct 6S audits, view historical logs, and monitor compliance via the dashboard."
            }
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Maintenance => write!(f, "maintenance"),
            Self::Audit => write!(f, "audit"),
        }
    }
}

/// One user's working state: both stores plus the selected module.
#[derive(Debug, Default)]
pub struct Session {
    /// Maintenance events logged during this session.
    pub maintenance: MaintenanceStore,
    /// Audits submitted during this session.
    pub audits: AuditStore,
    active: Module,
}

impl Session {
    /// Start a session with empty stores and `module` selected.
    #[must_use]
    pub fn new(module: Module) -> Self {
        info!("Session started in {} module", module);
        Self {
            maintenance: MaintenanceStore::new(),
            audits: AuditStore::new(),
            active: module,
        }
    }

    /// The currently selected module.
    #[must_use]
    pub fn active(&self) -> Module {
        self.active
    }

    /// Switch the selected module. Stores are untouched.
    pub fn select(&mut self, module: Module) {
        self.active = module;
    }

    /// Number of records in the given module's store.
    #[must_use]
    pub fn record_count(&self, module: Module) -> usize {
        match module {
            Module::Maintenance => self.maintenance.len(),
            Module::Audit => self.audits.len(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!(
            "Session ended; discarding {} maintenance and {} audit records",
            self.maintenance.len(),
            self.audits.len()
        );
    }
}
