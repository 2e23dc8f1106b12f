//! Which locked-in sections each student can attend.
//!
//! Once meeting times are chosen, each student is matched against them to
//! see which groups they could join. Students with no options stand out
//! for manual follow-up.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Student, TimeSlot};

/// A section whose meeting time has been fixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockedSection {
    /// Facilitator name or facilitator slot id.
    pub facilitator: String,
    pub time: TimeSlot,
}

impl LockedSection {
    pub fn new(facilitator: impl Into<String>, time: impl Into<TimeSlot>) -> Self {
        Self {
            facilitator: facilitator.into(),
            time: time.into(),
        }
    }
}

impl fmt::Display for LockedSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.facilitator, self.time)
    }
}

/// The locked-in sections one student can attend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentOptions {
    pub student: String,
    /// Attendable sections, in the order they were locked in.
    pub sections: Vec<LockedSection>,
}

impl StudentOptions {
    /// Whether the student fits no section.
    #[inline]
    pub fn is_unplaceable(&self) -> bool {
        self.sections.is_empty()
    }
}

impl fmt::Display for StudentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.student)?;
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

/// Lists, for every student, the locked-in sections they can attend.
pub fn section_options(students: &[Student], locked: &[LockedSection]) -> Vec<StudentOptions> {
    students
        .iter()
        .map(|student| StudentOptions {
            student: student.name.clone(),
            sections: locked
                .iter()
                .filter(|section| student.is_available_at(&section.time))
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked() -> Vec<LockedSection> {
        vec![
            LockedSection::new("Scott", "W 3:00-4:20 PM"),
            LockedSection::new("Gabe", "M 4:30-5:50 PM"),
        ]
    }

    #[test]
    fn test_options_per_student() {
        let students = vec![
            Student::new("Bo", ["M 4:30-5:50 PM", "W 3:00-4:20 PM"]),
            Student::new("Cy", ["M 4:30-5:50 PM"]),
            Student::new("Di", ["F 9:00-10:20 AM"]),
        ];

        let options = section_options(&students, &locked());
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].sections.len(), 2);
        assert_eq!(options[1].sections, vec![LockedSection::new("Gabe", "M 4:30-5:50 PM")]);
        assert!(options[2].is_unplaceable());
    }

    #[test]
    fn test_display() {
        let students = vec![
            Student::new("Bo", ["M 4:30-5:50 PM", "W 3:00-4:20 PM"]),
            Student::new("Di", Vec::<&str>::new()),
        ];
        let options = section_options(&students, &locked());

        assert_eq!(
            options[0].to_string(),
            "Bo: Scott (W 3:00-4:20 PM), Gabe (M 4:30-5:50 PM)"
        );
        assert_eq!(options[1].to_string(), "Di: ");
    }
}
