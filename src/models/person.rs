//! Students, facilitators, and facilitator slots.
//!
//! A facilitator who can lead `capacity` sections is expanded into that
//! many independent [`FacilitatorSlot`]s, named `"<name> 1"`, `"<name> 2"`, ...
//! Each slot carries the facilitator's full availability and is scheduled
//! on its own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::TimeSlot;

/// A student and the times they can attend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique display name.
    pub name: String,
    /// Times the student can make weekly.
    pub availability: BTreeSet<TimeSlot>,
}

/// A facilitator, their availability, and how many sections they lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facilitator {
    /// Unique display name.
    pub name: String,
    /// Times the facilitator can lead a section.
    pub availability: BTreeSet<TimeSlot>,
    /// Number of sections requested (0 = none).
    pub capacity: u32,
}

/// One schedulable section belonging to a facilitator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitatorSlot {
    /// Index-suffixed unique id, e.g. `"Ada 2"`.
    pub id: String,
    /// Name of the owning facilitator.
    pub facilitator: String,
    /// 1-based section number within the facilitator.
    pub index: u32,
    /// Copy of the facilitator's availability.
    pub availability: BTreeSet<TimeSlot>,
}

impl Student {
    /// Creates a student.
    pub fn new<I, T>(name: impl Into<String>, availability: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TimeSlot>,
    {
        Self {
            name: name.into(),
            availability: availability.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of distinct times the student can make.
    #[inline]
    pub fn availability_count(&self) -> usize {
        self.availability.len()
    }

    /// Whether the student can attend at `time`.
    #[inline]
    pub fn is_available_at(&self, time: &TimeSlot) -> bool {
        self.availability.contains(time)
    }
}

impl Facilitator {
    /// Creates a facilitator leading a single section.
    pub fn new<I, T>(name: impl Into<String>, availability: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TimeSlot>,
    {
        Self {
            name: name.into(),
            availability: availability.into_iter().map(Into::into).collect(),
            capacity: 1,
        }
    }

    /// Sets the number of sections.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Expands this facilitator into `capacity` slots.
    pub fn slots(&self) -> Vec<FacilitatorSlot> {
        (1..=self.capacity)
            .map(|index| FacilitatorSlot {
                id: format!("{} {}", self.name, index),
                facilitator: self.name.clone(),
                index,
                availability: self.availability.clone(),
            })
            .collect()
    }
}

impl FacilitatorSlot {
    /// Whether this slot may meet at `time`.
    #[inline]
    pub fn is_available_at(&self, time: &TimeSlot) -> bool {
        self.availability.contains(time)
    }
}
