//! `opstracker` - Session-scoped equipment maintenance and 6S audit tracking
//!
//! This library provides the record stores, entry forms, log viewers and
//! date-filtered dashboards behind the `opstrack` terminal application.
//! Records live in memory for the length of one [`Session`] and are never
//! persisted except through explicit CSV export.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod audit;
pub mod chart;
pub mod checklist;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod logging;
pub mod logs;
pub mod maintenance;
pub mod session;
pub mod shell;
pub mod store;
pub mod table;

pub use audit::{AuditRecord, AuditStore, ItemResult};
pub use checklist::{Category, ChecklistItem, ITEMS, ITEM_COUNT};
pub use config::Config;
pub use dashboard::{DashboardView, DateRange};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use maintenance::{ActivityKind, MaintenanceRecord, MaintenanceStore};
pub use session::{Module, Session};
pub use shell::Shell;
pub use store::{Dated, Store};
pub use table::Table;
