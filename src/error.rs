//! Error types for facility-dash.
//!
//! Every error here is recoverable at the UI boundary: the dashboard surfaces
//! it as a flash message or an inline form hint and keeps running.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::records::RecordId;

/// A form field that takes part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Airport,
    Grade,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Airport => "airport",
            Field::Grade => "grade",
        };
        f.write_str(label)
    }
}

/// A single problem found while validating a record draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Required field left blank.
    Missing(Field),
    /// Grade outside 1..=23.
    GradeOutOfRange(u8),
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Missing(field) => *field,
            FieldError::GradeOutOfRange(_) => Field::Grade,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing(field) => write!(f, "{} is required", field),
            FieldError::GradeOutOfRange(grade) => {
                write!(f, "grade {} is outside 1-23", grade)
            }
        }
    }
}

/// Numeric attribute read by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Pax,
    Traffic,
    Runway,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Attribute::Pax => "pax",
            Attribute::Traffic => "traffic",
            Attribute::Runway => "runway",
        };
        f.write_str(label)
    }
}

/// The main error type for dashboard operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A draft failed required-field validation.
    #[error("invalid record: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Batch scoring was triggered with nothing selected.
    #[error("no records selected for scoring")]
    EmptySelection,

    /// Update or delete referenced an id the store does not hold.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// A record could not be scored because an attribute is blank or not a number.
    #[error("record {id} cannot be scored: {field} is blank or not a number")]
    InvalidRecord {
        /// Record that failed.
        id: RecordId,
        /// The offending attribute.
        field: Attribute,
    },

    /// File upload is accepted for CSV files but not implemented yet.
    #[error("upload of {} is not implemented yet", .path.display())]
    UploadNotImplemented {
        /// The file that was offered.
        path: PathBuf,
    },

    /// Only CSV files are accepted for upload.
    #[error("unsupported file type for {} (expected .csv)", .path.display())]
    UnsupportedFileType {
        /// The file that was offered.
        path: PathBuf,
    },

    /// The background scoring task did not complete.
    #[error("score generation failed: {0}")]
    JobFailed(String),
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
