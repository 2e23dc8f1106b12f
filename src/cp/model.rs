//! CSP model for section scheduling.
//!
//! Builds one variable per facilitator slot (domain = its availability)
//! and one variable per kept student (domain = every facilitator slot),
//! plus an availability constraint per student and a group-size
//! constraint per slot.

use log::info;
use std::collections::BTreeSet;

use super::{AvailabilityConstraint, Constraint, GroupSizeConstraint};
use crate::models::{FacilitatorSlot, Student, TimeSlot};

/// Reference to a CSP variable by kind and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarRef {
    /// Facilitator slot variable; its value is a meeting time.
    Slot(usize),
    /// Student variable; its value is a facilitator slot.
    Student(usize),
}

/// A facilitator slot variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotVariable {
    /// Facilitator slot id.
    pub id: String,
    /// Candidate meeting times, in canonical order.
    pub domain: Vec<TimeSlot>,
}

/// A student variable.
///
/// Its domain is implicit: every slot of the model it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentVariable {
    /// Student name.
    pub id: String,
    /// Times the student can attend.
    pub availability: BTreeSet<TimeSlot>,
}

/// A fully built section-scheduling CSP.
#[derive(Debug, Clone)]
pub struct SectionCsp {
    slots: Vec<SlotVariable>,
    students: Vec<StudentVariable>,
    constraints: Vec<Constraint>,
    min_group_size: usize,
}

impl SectionCsp {
    /// Facilitator slot variables.
    #[inline]
    pub fn slot_variables(&self) -> &[SlotVariable] {
        &self.slots
    }

    /// Student variables.
    #[inline]
    pub fn student_variables(&self) -> &[StudentVariable] {
        &self.students
    }

    /// All constraints.
    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of variables of both kinds.
    #[inline]
    pub fn variable_count(&self) -> usize {
        self.slots.len() + self.students.len()
    }

    /// Minimum students per slot.
    #[inline]
    pub fn min_group_size(&self) -> usize {
        self.min_group_size
    }

    /// Default variable order: every slot, then every student.
    pub fn variables(&self) -> Vec<VarRef> {
        (0..self.slots.len())
            .map(VarRef::Slot)
            .chain((0..self.students.len()).map(VarRef::Student))
            .collect()
    }

    /// Domain size of `var`.
    #[inline]
    pub fn domain_size(&self, var: VarRef) -> usize {
        match var {
            VarRef::Slot(i) => self.slots[i].domain.len(),
            VarRef::Student(_) => self.slots.len(),
        }
    }

    /// Display id of `var`.
    pub fn variable_id(&self, var: VarRef) -> &str {
        match var {
            VarRef::Slot(i) => &self.slots[i].id,
            VarRef::Student(i) => &self.students[i].id,
        }
    }

    /// Product of every domain size: the unconstrained search space.
    ///
    /// Saturates at `u128::MAX`.
    pub fn possible_configurations(&self) -> u128 {
        self.variables()
            .into_iter()
            .map(|var| self.domain_size(var) as u128)
            .try_fold(1u128, |acc, size| acc.checked_mul(size))
            .unwrap_or(u128::MAX)
    }

    /// Index of the slot with the given id.
    pub fn slot_index(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    /// Index of the student with the given name.
    pub fn student_index(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }
}

/// Builds a [`SectionCsp`] from facilitator slots and kept students.
///
/// # Example
/// ```
/// use section_csp::cp::SectionCspBuilder;
/// use section_csp::models::{Facilitator, Student};
///
/// let slots = Facilitator::new("Ada", ["M 3:00-4:20 PM", "W 3:00-4:20 PM"]).slots();
/// let students = vec![Student::new("Bo", ["M 3:00-4:20 PM"])];
/// let csp = SectionCspBuilder::new(&slots, &students)
///     .with_min_group_size(1)
///     .build();
///
/// assert_eq!(csp.variable_count(), 2);
/// assert_eq!(csp.possible_configurations(), 2);
/// ```
pub struct SectionCspBuilder<'a> {
    slots: &'a [FacilitatorSlot],
    students: &'a [Student],
    min_group_size: usize,
}

impl<'a> SectionCspBuilder<'a> {
    /// Creates a new builder with a minimum group size of 1.
    pub fn new(slots: &'a [FacilitatorSlot], students: &'a [Student]) -> Self {
        Self {
            slots,
            students,
            min_group_size: 1,
        }
    }

    /// Sets the minimum number of students per slot.
    pub fn with_min_group_size(mut self, min_group_size: usize) -> Self {
        self.min_group_size = min_group_size;
        self
    }

    /// Builds the CSP.
    ///
    /// Creates:
    /// - A slot variable per facilitator slot
    /// - A student variable per student
    /// - An availability constraint per student
    /// - A group-size constraint per slot
    pub fn build(&self) -> SectionCsp {
        let slots: Vec<SlotVariable> = self
            .slots
            .iter()
            .map(|slot| SlotVariable {
                id: slot.id.clone(),
                domain: slot.availability.iter().cloned().collect(),
            })
            .collect();

        let students: Vec<StudentVariable> = self
            .students
            .iter()
            .map(|student| StudentVariable {
                id: student.name.clone(),
                availability: student.availability.clone(),
            })
            .collect();

        let constraints = (0..students.len())
            .map(|student| Constraint::Availability(AvailabilityConstraint { student }))
            .chain((0..slots.len()).map(|slot| {
                Constraint::GroupSize(GroupSizeConstraint {
                    slot,
                    min_group_size: self.min_group_size,
                })
            }))
            .collect();

        let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        info!("Facilitators: {}", ids.join(", "));

        let csp = SectionCsp {
            slots,
            students,
            constraints,
            min_group_size: self.min_group_size,
        };
        info!(
            "Total possible configurations: {}",
            csp.possible_configurations()
        );
        csp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::ConstraintCheck;
    use crate::models::Facilitator;

    fn make_slots() -> Vec<FacilitatorSlot> {
        let mut slots = Facilitator::new("Ada", ["W 3:00-4:20 PM", "M 3:00-4:20 PM", "Tu 9:00-10:20 AM"])
            .with_capacity(2)
            .slots();
        slots.extend(Facilitator::new("Eve", ["F 1:30-2:50 PM"]).slots());
        slots
    }

    fn make_students(n: usize) -> Vec<Student> {
        (0..n)
            .map(|i| Student::new(format!("S{i}"), ["M 3:00-4:20 PM"]))
            .collect()
    }

    #[test]
    fn test_build_variables() {
        let slots = make_slots();
        let students = make_students(4);
        let csp = SectionCspBuilder::new(&slots, &students).build();

        assert_eq!(csp.slot_count(), 3);
        assert_eq!(csp.student_count(), 4);
        assert_eq!(csp.variable_count(), 7);
        assert_eq!(csp.slot_variables()[0].id, "Ada 1");
        assert_eq!(csp.domain_size(VarRef::Student(2)), 3);
    }

    #[test]
    fn test_slot_domain_in_canonical_order() {
        let slots = make_slots();
        let csp = SectionCspBuilder::new(&slots, &[]).build();

        let labels: Vec<&str> = csp.slot_variables()[0]
            .domain
            .iter()
            .map(TimeSlot::as_str)
            .collect();
        assert_eq!(
            labels,
            vec!["M 3:00-4:20 PM", "Tu 9:00-10:20 AM", "W 3:00-4:20 PM"]
        );
    }

    #[test]
    fn test_constraint_counts() {
        let slots = make_slots();
        let students = make_students(4);
        let csp = SectionCspBuilder::new(&slots, &students)
            .with_min_group_size(2)
            .build();

        let availability = csp
            .constraints()
            .iter()
            .filter(|c| matches!(c, Constraint::Availability(_)))
            .count();
        let group = csp
            .constraints()
            .iter()
            .filter(|c| matches!(c, Constraint::GroupSize(g) if g.min_group_size == 2))
            .count();
        assert_eq!(availability, 4);
        assert_eq!(group, 3);

        for c in csp.constraints() {
            assert!(!c.scope(&csp).is_empty());
        }
    }

    #[test]
    fn test_possible_configurations() {
        let slots = make_slots();
        let students = make_students(4);
        let csp = SectionCspBuilder::new(&slots, &students).build();

        // Slot domains 3 * 3 * 1, students 3^4.
        assert_eq!(csp.possible_configurations(), 9 * 81);
    }

    #[test]
    fn test_configurations_scale_with_students() {
        let slots = make_slots();
        let mut previous = 0;
        for n in 0..6 {
            let students = make_students(n);
            let count = SectionCspBuilder::new(&slots, &students)
                .build()
                .possible_configurations();
            if n > 0 {
                assert_eq!(count, previous * slots.len() as u128);
            }
            previous = count;
        }
    }

    #[test]
    fn test_possible_configurations_saturates() {
        let slots: Vec<FacilitatorSlot> = (0..4)
            .flat_map(|i| Facilitator::new(format!("F{i}"), ["M 3:00-4:20 PM"]).with_capacity(25).slots())
            .collect();
        let students = make_students(40);
        let csp = SectionCspBuilder::new(&slots, &students).build();

        // 100^40 overflows u128.
        assert_eq!(csp.possible_configurations(), u128::MAX);
    }

    #[test]
    fn test_lookup() {
        let slots = make_slots();
        let students = make_students(2);
        let csp = SectionCspBuilder::new(&slots, &students).build();

        assert_eq!(csp.slot_index("Eve 1"), Some(2));
        assert_eq!(csp.student_index("S1"), Some(1));
        assert_eq!(csp.slot_index("Nobody 1"), None);
        assert_eq!(csp.variable_id(VarRef::Student(0)), "S0");
    }
}
