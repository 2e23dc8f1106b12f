//! Roster rows and the partitioned roster.
//!
//! Rows arrive from an external source (survey export, spreadsheet) as
//! plain strings. [`Roster::from_records`] types them, splitting students
//! from facilitators and validating section counts. The first bad row
//! aborts construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Facilitator, FacilitatorSlot, Student, TimeSlot};
use crate::error::RosterError;

/// Role declared by a roster row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Facilitator,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Student" => Ok(Self::Student),
            "Facilitator" => Ok(Self::Facilitator),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("Student"),
            Role::Facilitator => f.write_str("Facilitator"),
        }
    }
}

/// One untyped roster row.
///
/// Field aliases match the column headers of the sign-up form export, so a
/// row can be deserialized straight from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(alias = "Full Name")]
    pub name: String,
    #[serde(alias = "Are you a student or a facilitator?")]
    pub role: String,
    /// Comma-delimited time slots.
    #[serde(alias = "Availability")]
    pub availability: String,
    /// Section count, only read for facilitators.
    #[serde(default, alias = "Chosen num sections")]
    pub capacity: Option<String>,
}

impl RosterRecord {
    /// Creates a student row.
    pub fn student(name: impl Into<String>, availability: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Student.to_string(),
            availability: availability.into(),
            capacity: None,
        }
    }

    /// Creates a facilitator row.
    pub fn facilitator(
        name: impl Into<String>,
        availability: impl Into<String>,
        capacity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: Role::Facilitator.to_string(),
            availability: availability.into(),
            capacity: Some(capacity.into()),
        }
    }
}

/// Students and facilitators, read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub students: Vec<Student>,
    pub facilitators: Vec<Facilitator>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a student.
    pub fn with_student(mut self, student: Student) -> Self {
        self.students.push(student);
        self
    }

    /// Adds a facilitator.
    pub fn with_facilitator(mut self, facilitator: Facilitator) -> Self {
        self.facilitators.push(facilitator);
        self
    }

    /// Builds a roster from raw rows, preserving row order.
    ///
    /// # Errors
    /// - [`RosterError::InvalidRole`] for an unrecognized role.
    /// - [`RosterError::InvalidCapacity`] for a facilitator whose section
    ///   count is missing or not a non-negative integer.
    pub fn from_records<'a, I>(records: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = &'a RosterRecord>,
    {
        let mut roster = Self::new();

        for record in records {
            let role: Role = record.role.parse().map_err(|_| RosterError::InvalidRole {
                name: record.name.clone(),
                role: record.role.clone(),
            })?;
            let availability = TimeSlot::parse_set(&record.availability);

            match role {
                Role::Student => roster.students.push(Student {
                    name: record.name.clone(),
                    availability,
                }),
                Role::Facilitator => {
                    let raw = record.capacity.as_deref().unwrap_or_default();
                    let capacity: u32 =
                        raw.trim()
                            .parse()
                            .map_err(|_| RosterError::InvalidCapacity {
                                name: record.name.clone(),
                                value: raw.to_string(),
                            })?;
                    roster.facilitators.push(Facilitator {
                        name: record.name.clone(),
                        availability,
                        capacity,
                    });
                }
            }
        }

        Ok(roster)
    }

    /// All facilitator slots, in facilitator order then section order.
    pub fn facilitator_slots(&self) -> Vec<FacilitatorSlot> {
        self.facilitators.iter().flat_map(Facilitator::slots).collect()
    }

    /// Total number of requested sections.
    pub fn total_capacity(&self) -> u64 {
        self.facilitators.iter().map(|f| u64::from(f.capacity)).sum()
    }
}
