//! Input validation for section rosters.
//!
//! Checks structural integrity of a roster before the CSP is built.
//! Detects:
//! - Duplicate student names
//! - Duplicate facilitator slot ids (e.g. the same facilitator listed twice)
//! - Student names that collide with a facilitator slot id
//! - Blank names
//!
//! Students and facilitator slots become variables in one shared
//! namespace, so any collision would make solutions ambiguous.

use crate::models::Roster;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students, or two facilitator slots, share an id.
    DuplicateId,
    /// A student name equals a facilitator slot id.
    NameCollision,
    /// A person has an empty or whitespace-only name.
    BlankName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a roster.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();

    let mut student_names = HashSet::new();
    for student in &roster.students {
        if student.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                "Student with a blank name",
            ));
        }
        if !student_names.insert(student.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student name: {}", student.name),
            ));
        }
    }

    for facilitator in &roster.facilitators {
        if facilitator.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                "Facilitator with a blank name",
            ));
        }
    }

    let mut slot_ids = HashSet::new();
    for slot in roster.facilitator_slots() {
        if student_names.contains(slot.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NameCollision,
                format!("Student name '{}' collides with a facilitator slot", slot.id),
            ));
        }
        if !slot_ids.insert(slot.id.clone()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate facilitator slot ID: {}", slot.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Facilitator, Student};

    fn sample_roster() -> Roster {
        Roster::new()
            .with_student(Student::new("Bo", ["M 3:00-4:20 PM"]))
            .with_student(Student::new("Cy", ["M 3:00-4:20 PM"]))
            .with_facilitator(Facilitator::new("Ada", ["M 3:00-4:20 PM"]).with_capacity(2))
    }

    #[test]
    fn test_valid_roster() {
        assert!(validate_roster(&sample_roster()).is_ok());
    }

    #[test]
    fn test_duplicate_student() {
        let roster = sample_roster().with_student(Student::new("Bo", ["W 3:00-4:20 PM"]));

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("Bo")));
    }

    #[test]
    fn test_duplicate_facilitator() {
        let roster =
            sample_roster().with_facilitator(Facilitator::new("Ada", ["W 3:00-4:20 PM"]));

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("Ada 1")));
    }

    #[test]
    fn test_student_collides_with_slot() {
        let roster = sample_roster().with_student(Student::new("Ada 2", ["M 3:00-4:20 PM"]));

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NameCollision));
    }

    #[test]
    fn test_multiple_errors() {
        let roster = sample_roster()
            .with_student(Student::new(" ", ["M 3:00-4:20 PM"]))
            .with_facilitator(Facilitator::new("Ada", ["M 3:00-4:20 PM"]));

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors.len() >= 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::BlankName));
    }
}
