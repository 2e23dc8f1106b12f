//! Availability-band pruning of students.
//!
//! Every kept student multiplies the search space by the number of
//! facilitator slots. Students with very little availability add little
//! signal, and students available almost always add branching without
//! constraining anything, so both ends are dropped before search.
//!
//! This trades completeness for tractability. Students are filtered on
//! the *size* of their availability only; a student whose times never
//! overlap any facilitator is kept if the count is in band.

use log::info;
use serde::{Deserialize, Serialize};

use crate::models::Student;

/// Inclusive bounds on a student's availability count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityBand {
    /// Fewest availabilities a kept student may have.
    pub min: usize,
    /// Most availabilities a kept student may have.
    pub max: usize,
}

impl AvailabilityBand {
    /// Creates a band `[min, max]`.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// A band that keeps every student.
    pub fn unbounded() -> Self {
        Self::new(0, usize::MAX)
    }

    /// Classifies an availability count.
    pub fn classify(&self, count: usize) -> Option<RemovalReason> {
        if count > self.max {
            Some(RemovalReason::TooMuchAvailability)
        } else if count < self.min {
            Some(RemovalReason::TooLittleAvailability)
        } else {
            None
        }
    }

    /// Whether `other` lies entirely within this band.
    pub fn contains_band(&self, other: &Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

impl Default for AvailabilityBand {
    fn default() -> Self {
        Self::new(5, 12)
    }
}

/// Why a student was pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalReason {
    /// More availabilities than the band maximum.
    TooMuchAvailability,
    /// Fewer availabilities than the band minimum.
    TooLittleAvailability,
}

/// Result of pruning a student list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Students that take part in the search, in input order.
    pub kept: Vec<Student>,
    /// Dropped students with the reason, in input order.
    pub removed: Vec<(Student, RemovalReason)>,
}

impl PruneOutcome {
    /// Number of students examined.
    pub fn total(&self) -> usize {
        self.kept.len() + self.removed.len()
    }

    /// Number of students removed for `reason`.
    pub fn removed_count(&self, reason: RemovalReason) -> usize {
        self.removed.iter().filter(|(_, r)| *r == reason).count()
    }

    /// Summary counts, suitable for reporting.
    pub fn summary(&self) -> PruneSummary {
        PruneSummary {
            total: self.total(),
            kept: self.kept.len(),
            removed_too_much: self.removed_count(RemovalReason::TooMuchAvailability),
            removed_too_little: self.removed_count(RemovalReason::TooLittleAvailability),
        }
    }
}

/// Counts of kept and removed students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneSummary {
    pub total: usize,
    pub kept: usize,
    pub removed_too_much: usize,
    pub removed_too_little: usize,
}

/// Partitions students into kept and removed by availability count.
pub fn prune_students(students: &[Student], band: AvailabilityBand) -> PruneOutcome {
    let mut outcome = PruneOutcome::default();

    for student in students {
        match band.classify(student.availability_count()) {
            None => outcome.kept.push(student.clone()),
            Some(reason) => outcome.removed.push((student.clone(), reason)),
        }
    }

    let summary = outcome.summary();
    info!(
        "Removed {}/{} students with more than {} availabilities.",
        summary.removed_too_much, summary.total, band.max
    );
    info!(
        "Removed {}/{} students with fewer than {} availabilities.",
        summary.removed_too_little, summary.total, band.min
    );

    outcome
}
