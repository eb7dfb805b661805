//! Error types for timetabling operations.

use std::fmt;

use thiserror::Error;

use crate::conflict::Conflict;
use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Department,
    Course,
    Classroom,
    Instructor,
    UnavailableTime,
    Entry,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Department => "department",
            EntityKind::Course => "course",
            EntityKind::Classroom => "classroom",
            EntityKind::Instructor => "instructor",
            EntityKind::UnavailableTime => "unavailable time",
            EntityKind::Entry => "schedule entry",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while validating, placing, storing, or exporting.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The placement collides with existing entries or instructor blackouts.
    /// Nothing was mutated.
    #[error("placement has {} conflict(s): {}", .conflicts.len(), join_conflicts(.conflicts))]
    Conflict { conflicts: Vec<Conflict> },

    /// A referenced entity does not exist.
    #[error("{entity} {key} not found")]
    NotFound { entity: EntityKind, key: String },

    /// Required reference data is missing; the run was aborted before any mutation.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The catalog failed integrity checks.
    #[error("catalog has {} integrity problem(s): {}", .0.len(), join_validation(.0))]
    Validation(Vec<ValidationError>),

    /// A caller-supplied value is malformed (bad time, unknown day, empty window).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A generation run was cancelled between courses. The store is unchanged.
    #[error("schedule generation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimetableError {
    pub(crate) fn not_found(entity: EntityKind, key: impl fmt::Display) -> Self {
        TimetableError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        TimetableError::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        TimetableError::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns true if this error reports a scheduling conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, TimetableError::Conflict { .. })
    }

    /// Returns true if this error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TimetableError::NotFound { .. })
    }

    /// The colliding bookings, if this is a conflict error.
    pub fn conflicts(&self) -> &[Conflict] {
        match self {
            TimetableError::Conflict { conflicts } => conflicts,
            _ => &[],
        }
    }
}

fn join_conflicts(conflicts: &[Conflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
