//! Section constraints and the partial assignment they are checked against.
//!
//! Two constraint kinds exist:
//! - [`AvailabilityConstraint`]: the slot a student joins must meet at a
//!   time the student can make. Which slot variable matters depends on the
//!   student's own value, so the scope is the student plus every slot.
//! - [`GroupSizeConstraint`]: at least `min_group_size` students join the
//!   slot. The scope is every student.
//!
//! Both report satisfied while their scope is only partly bound; the
//! solver evaluates each constraint once its last scope variable is set.

use super::{SectionCsp, VarRef};

/// The current, possibly partial, assignment.
///
/// Values are domain indices: a slot's value indexes its time domain, a
/// student's value indexes the facilitator slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    slot_times: Vec<Option<usize>>,
    student_slots: Vec<Option<usize>>,
}

impl Binding {
    /// An empty binding for `slots` slot variables and `students` student variables.
    pub fn new(slots: usize, students: usize) -> Self {
        Self {
            slot_times: vec![None; slots],
            student_slots: vec![None; students],
        }
    }

    /// Binds `var` to the domain index `value`.
    #[inline]
    pub fn bind(&mut self, var: VarRef, value: usize) {
        match var {
            VarRef::Slot(i) => self.slot_times[i] = Some(value),
            VarRef::Student(i) => self.student_slots[i] = Some(value),
        }
    }

    /// Clears `var`.
    #[inline]
    pub fn unbind(&mut self, var: VarRef) {
        match var {
            VarRef::Slot(i) => self.slot_times[i] = None,
            VarRef::Student(i) => self.student_slots[i] = None,
        }
    }

    /// Domain index bound to `var`, if any.
    #[inline]
    pub fn value(&self, var: VarRef) -> Option<usize> {
        match var {
            VarRef::Slot(i) => self.slot_times.get(i).copied().flatten(),
            VarRef::Student(i) => self.student_slots.get(i).copied().flatten(),
        }
    }

    /// Time index chosen for slot `slot`.
    #[inline]
    pub fn slot_time(&self, slot: usize) -> Option<usize> {
        self.value(VarRef::Slot(slot))
    }

    /// Slot joined by student `student`.
    #[inline]
    pub fn student_slot(&self, student: usize) -> Option<usize> {
        self.value(VarRef::Student(student))
    }

    /// Whether every variable has a value.
    pub fn is_complete(&self) -> bool {
        self.slot_times.iter().all(Option::is_some) && self.student_slots.iter().all(Option::is_some)
    }

    pub(crate) fn slot_times(&self) -> &[Option<usize>] {
        &self.slot_times
    }

    pub(crate) fn student_slots(&self) -> &[Option<usize>] {
        &self.student_slots
    }
}

/// A constraint that can be evaluated against a binding.
pub trait ConstraintCheck {
    /// Variables this constraint reads.
    fn scope(&self, csp: &SectionCsp) -> Vec<VarRef>;

    /// Whether the binding satisfies this constraint.
    ///
    /// Returns `true` while any scope variable is unbound.
    fn is_satisfied(&self, csp: &SectionCsp, binding: &Binding) -> bool;
}

/// The student's slot must meet at a time the student is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilityConstraint {
    /// Student variable index.
    pub student: usize,
}

impl ConstraintCheck for AvailabilityConstraint {
    fn scope(&self, csp: &SectionCsp) -> Vec<VarRef> {
        std::iter::once(VarRef::Student(self.student))
            .chain((0..csp.slot_count()).map(VarRef::Slot))
            .collect()
    }

    fn is_satisfied(&self, csp: &SectionCsp, binding: &Binding) -> bool {
        let Some(slot) = binding.student_slot(self.student) else {
            return true;
        };
        let Some(time) = binding.slot_time(slot) else {
            return true;
        };

        let chosen = &csp.slot_variables()[slot].domain[time];
        csp.student_variables()[self.student]
            .availability
            .contains(chosen)
    }
}

/// At least `min_group_size` students must join the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupSizeConstraint {
    /// Slot variable index.
    pub slot: usize,
    pub min_group_size: usize,
}

impl ConstraintCheck for GroupSizeConstraint {
    fn scope(&self, csp: &SectionCsp) -> Vec<VarRef> {
        (0..csp.student_count()).map(VarRef::Student).collect()
    }

    fn is_satisfied(&self, _csp: &SectionCsp, binding: &Binding) -> bool {
        let mut members = 0;
        for choice in binding.student_slots() {
            match choice {
                None => return true,
                Some(slot) if *slot == self.slot => members += 1,
                Some(_) => {}
            }
        }
        members >= self.min_group_size
    }
}

/// Any section constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    Availability(AvailabilityConstraint),
    GroupSize(GroupSizeConstraint),
}

impl ConstraintCheck for Constraint {
    fn scope(&self, csp: &SectionCsp) -> Vec<VarRef> {
        match self {
            Constraint::Availability(c) => c.scope(csp),
            Constraint::GroupSize(c) => c.scope(csp),
        }
    }

    fn is_satisfied(&self, csp: &SectionCsp, binding: &Binding) -> bool {
        match self {
            Constraint::Availability(c) => c.is_satisfied(csp, binding),
            Constraint::GroupSize(c) => c.is_satisfied(csp, binding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::SectionCspBuilder;
    use crate::models::{Facilitator, Student};

    fn make_csp(min_group_size: usize) -> SectionCsp {
        // Slot 0 ("Ada 1") offers A, B; slot 1 ("Eve 1") offers B, C.
        let slots = [
            Facilitator::new("Ada", ["M 1:00-1:50 PM", "Tu 1:00-1:50 PM"]),
            Facilitator::new("Eve", ["Tu 1:00-1:50 PM", "W 1:00-1:50 PM"]),
        ]
        .iter()
        .flat_map(Facilitator::slots)
        .collect::<Vec<_>>();
        let students = vec![
            Student::new("Bo", ["Tu 1:00-1:50 PM"]),
            Student::new("Cy", ["M 1:00-1:50 PM", "W 1:00-1:50 PM"]),
        ];
        SectionCspBuilder::new(&slots, &students)
            .with_min_group_size(min_group_size)
            .build()
    }

    #[test]
    fn test_availability_scope_covers_all_slots() {
        let csp = make_csp(1);
        let scope = AvailabilityConstraint { student: 1 }.scope(&csp);
        assert_eq!(
            scope,
            vec![VarRef::Student(1), VarRef::Slot(0), VarRef::Slot(1)]
        );
    }

    #[test]
    fn test_availability_follows_student_choice() {
        let csp = make_csp(1);
        let c = AvailabilityConstraint { student: 0 };
        let mut binding = Binding::new(2, 2);

        // Unbound scope is not a violation.
        assert!(c.is_satisfied(&csp, &binding));

        binding.bind(VarRef::Slot(0), 0); // Ada 1 at M
        binding.bind(VarRef::Slot(1), 0); // Eve 1 at Tu
        binding.bind(VarRef::Student(0), 0);
        assert!(!c.is_satisfied(&csp, &binding));

        binding.bind(VarRef::Student(0), 1);
        assert!(c.is_satisfied(&csp, &binding));
    }

    #[test]
    fn test_group_size_waits_for_all_students() {
        let csp = make_csp(2);
        let c = GroupSizeConstraint {
            slot: 0,
            min_group_size: 2,
        };
        let mut binding = Binding::new(2, 2);

        binding.bind(VarRef::Student(0), 1);
        assert!(c.is_satisfied(&csp, &binding));

        binding.bind(VarRef::Student(1), 0);
        assert!(!c.is_satisfied(&csp, &binding));

        binding.bind(VarRef::Student(0), 0);
        assert!(c.is_satisfied(&csp, &binding));
        assert!(!binding.is_complete());
    }

    #[test]
    fn test_unbind() {
        let mut binding = Binding::new(1, 1);
        binding.bind(VarRef::Slot(0), 3);
        binding.bind(VarRef::Student(0), 0);
        assert!(binding.is_complete());

        binding.unbind(VarRef::Slot(0));
        assert_eq!(binding.slot_time(0), None);
        assert_eq!(binding.student_slot(0), Some(0));
    }
}
