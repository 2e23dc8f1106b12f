//! Error types.
//!
//! Construction errors (bad roster rows, inconsistent rosters) abort before
//! any search starts. The search itself cannot fail; an empty solution set
//! is reported as an outcome, not an error.

use thiserror::Error;

use crate::validation::ValidationError;

/// A roster row that cannot be turned into a student or facilitator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Role column is neither `Student` nor `Facilitator`.
    #[error("invalid role for '{name}': '{role}' (expected Student or Facilitator)")]
    InvalidRole { name: String, role: String },

    /// Facilitator section count is missing or not a non-negative integer.
    #[error("invalid number of sections for '{name}' (please enter manually): '{value}'")]
    InvalidCapacity { name: String, value: String },
}

/// Errors raised while preparing a scheduling run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("roster failed validation with {} problem(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

impl From<Vec<ValidationError>> for SchedulingError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}
