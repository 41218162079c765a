//! Error types for opstracker.
//!
//! This module defines all error types used throughout the opstracker crate,
//! providing detailed context for debugging and user-facing messages.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for opstracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A dashboard date range whose start falls after its end.
    #[error("Error: End date must be after start date.")]
    InvalidDateRange {
        /// First day of the requested range.
        start: NaiveDate,
        /// Last day of the requested range.
        end: NaiveDate,
    },

    /// A date field could not be parsed.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// An activity type selection could not be matched.
    #[error("invalid activity type '{input}': choose 1-4 or one of Inspection, Repair, Replacement, Cleaning")]
    InvalidActivity {
        /// The rejected input.
        input: String,
    },

    /// A yes/no answer could not be understood.
    #[error("invalid answer '{input}': expected y or n")]
    InvalidAnswer {
        /// The rejected input.
        input: String,
    },

    /// A form was abandoned because its input ended early.
    #[error("form input ended before '{field}' was entered")]
    FormAbandoned {
        /// The field that was waiting for input.
        field: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for opstracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Create an invalid activity error.
    #[must_use]
    pub fn invalid_activity(input: impl Into<String>) -> Self {
        Self::InvalidActivity {
            input: input.into(),
        }
    }

    /// Create an invalid answer error.
    #[must_use]
    pub fn invalid_answer(input: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            input: input.into(),
        }
    }

    /// Create a form abandoned error.
    #[must_use]
    pub fn form_abandoned(field: impl Into<String>) -> Self {
        Self::FormAbandoned {
            field: field.into(),
        }
    }

    /// Check if this error came from rejected user input that can be re-entered.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. }
                | Self::InvalidActivity { .. }
                | Self::InvalidAnswer { .. }
                | Self::InvalidDateRange { .. }
        )
    }
}
