//! Equipment maintenance records.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::{Dated, Store};

/// Kind of maintenance work performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Visual or functional check.
    #[default]
    Inspection,
    /// Fixing a fault.
    Repair,
    /// Swapping a part or unit.
    Replacement,
    /// Cleaning work.
    Cleaning,
}

impl ActivityKind {
    /// All kinds, in the order the entry form lists them.
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Inspection,
        ActivityKind::Repair,
        ActivityKind::Replacement,
        ActivityKind::Cleaning,
    ];

    /// Display name of the activity kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Inspection => "Inspection",
            Self::Repair => "Repair",
            Self::Replacement => "Replacement",
            Self::Cleaning => "Cleaning",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityKind {
    type Err = Error;

    /// Accepts a 1-based option number or a case-insensitive name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| Error::invalid_activity(trimmed));
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::invalid_activity(trimmed))
    }
}

/// A logged maintenance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Day the work was done.
    pub date: NaiveDate,
    /// Equipment identifier, free text.
    pub equipment: String,
    /// Who did the work, free text.
    pub technician: String,
    /// What kind of work it was.
    pub activity: ActivityKind,
    /// Free-text notes.
    pub remarks: String,
}

impl Dated for MaintenanceRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The session's maintenance log.
pub type MaintenanceStore = Store<MaintenanceRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_display() {
        assert_eq!(ActivityKind::Inspection.to_string(), "Inspection");
        assert_eq!(ActivityKind::Replacement.to_string(), "Replacement");
    }

    #[test]
    fn test_activity_default_is_first_option() {
        assert_eq!(ActivityKind::default(), ActivityKind::ALL[0]);
    }

    #[test]
    fn test_activity_parse_by_number() {
        assert_eq!("1".parse::<ActivityKind>().unwrap(), ActivityKind::Inspection);
        assert_eq!("4".parse::<ActivityKind>().unwrap(), ActivityKind::Cleaning);
        assert!("0".parse::<ActivityKind>().is_err());
        assert!("5".parse::<ActivityKind>().is_err());
    }

    #[test]
    fn test_activity_parse_by_name() {
        assert_eq!("repair".parse::<ActivityKind>().unwrap(), ActivityKind::Repair);
        assert_eq!(
            "  CLEANING ".parse::<ActivityKind>().unwrap(),
            ActivityKind::Cleaning
        );
    }

    #[test]
    fn test_activity_parse_rejects_unknown() {
        let err = "Painting".parse::<ActivityKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidActivity { .. }));
    }

    #[test]
    fn test_record_date() {
        let record = MaintenanceRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            equipment: "Port-01".to_string(),
            technician: "Jane Doe".to_string(),
            activity: ActivityKind::Repair,
            remarks: String::new(),
        };
        assert_eq!(Dated::date(&record), record.date);
    }

    #[test]
    fn test_record_serialization() {
        let record = MaintenanceRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            equipment: "Port-01".to_string(),
            technician: "Jane Doe".to_string(),
            activity: ActivityKind::Cleaning,
            remarks: "dusty".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"2024-01-15\""));
        assert!(json.contains("\"Cleaning\""));
    }
}
