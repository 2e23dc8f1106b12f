//! Exhaustive backtracking search.
//!
//! # Algorithm
//!
//! Depth-first over an ordered variable list. At each depth the next
//! domain value is tried; after each tentative assignment only the
//! constraints whose scope has just become fully bound are checked. A
//! violation moves on to the next value; an exhausted domain backtracks.
//! When the last variable is bound the binding is emitted as a
//! [`Solution`] and the search resumes from there, so every valid total
//! assignment is produced exactly once.
//!
//! The search runs lazily through [`SolutionIter`]: one solution per
//! `next()` call, on an explicit stack, so callers can stop at any point
//! without holding every solution in memory.
//!
//! # Complexity
//! O(d^n) in the worst case, where n = variables and d = largest domain.

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::{Binding, ConstraintCheck, SearchCommand, SearchMonitor, SectionCsp, VarRef};
use crate::models::TimeSlot;

/// Order in which variables are branched on.
///
/// Order never changes the set of solutions, only their discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VariableOrder {
    /// Every facilitator slot, then every student.
    #[default]
    FacilitatorsFirst,
    /// Every student, then every facilitator slot.
    StudentsFirst,
    /// A seeded random permutation.
    Shuffled { seed: u64 },
}

impl VariableOrder {
    /// Arranges the variables of `csp` in this order.
    pub fn arrange(&self, csp: &SectionCsp) -> Vec<VarRef> {
        let mut order = csp.variables();
        match self {
            VariableOrder::FacilitatorsFirst => {}
            VariableOrder::StudentsFirst => order.rotate_left(csp.slot_count()),
            VariableOrder::Shuffled { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                order.shuffle(&mut rng);
            }
        }
        order
    }
}

/// One complete, consistent assignment.
///
/// Indexed like the variables of the CSP that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    slot_times: Vec<TimeSlot>,
    student_slots: Vec<usize>,
}

impl Solution {
    /// Creates a solution from per-slot times and per-student slot indices.
    pub fn new(slot_times: Vec<TimeSlot>, student_slots: Vec<usize>) -> Self {
        Self {
            slot_times,
            student_slots,
        }
    }

    /// Meeting time of slot `slot`.
    #[inline]
    pub fn time_of(&self, slot: usize) -> &TimeSlot {
        &self.slot_times[slot]
    }

    /// Slot joined by student `student`.
    #[inline]
    pub fn slot_of(&self, student: usize) -> usize {
        self.student_slots[student]
    }

    /// Meeting time of every slot.
    #[inline]
    pub fn slot_times(&self) -> &[TimeSlot] {
        &self.slot_times
    }

    /// Slot index of every student.
    #[inline]
    pub fn student_slots(&self) -> &[usize] {
        &self.student_slots
    }

    /// Number of students in slot `slot`.
    pub fn group_size(&self, slot: usize) -> usize {
        self.student_slots.iter().filter(|&&s| s == slot).count()
    }

    /// `(variable id, value)` pairs: slot id to time, then student to slot id.
    pub fn assignments<'a>(&'a self, csp: &'a SectionCsp) -> Vec<(&'a str, &'a str)> {
        let slots = csp.slot_variables();
        let slot_pairs = slots
            .iter()
            .zip(&self.slot_times)
            .map(|(var, time)| (var.id.as_str(), time.as_str()));
        let student_pairs = csp
            .student_variables()
            .iter()
            .zip(&self.student_slots)
            .map(|(var, &slot)| (var.id.as_str(), slots[slot].id.as_str()));
        slot_pairs.chain(student_pairs).collect()
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Every assignment was explored.
    Exhausted,
    /// A monitor stopped the search early.
    Terminated(String),
}

impl Termination {
    /// Whether the solution set is known to be complete.
    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Termination::Exhausted)
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Tentative assignments made.
    pub nodes_explored: u64,
    /// Constraint checks that failed.
    pub constraint_failures: u64,
    /// Domain exhaustions that returned to a shallower depth.
    pub backtracks: u64,
    /// Solutions emitted.
    pub solutions_found: u64,
    /// Wall time spent inside `next()`.
    pub duration: Duration,
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "  Constraint Failures: {}", self.constraint_failures)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(
            f,
            "  Duration (secs): {:.3}",
            self.duration.as_secs_f64()
        )
    }
}

/// Everything produced by a full run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Solutions in discovery order.
    pub solutions: Vec<Solution>,
    pub termination: Termination,
    pub statistics: SearchStatistics,
}

/// Exhaustive backtracking solver.
///
/// # Example
/// ```
/// use section_csp::cp::{BacktrackingSolver, NoOpMonitor, SectionCspBuilder};
/// use section_csp::models::{Facilitator, Student};
///
/// let slots = Facilitator::new("Ada", ["M 3:00-4:20 PM", "W 3:00-4:20 PM"]).slots();
/// let students = vec![
///     Student::new("Bo", ["M 3:00-4:20 PM", "W 3:00-4:20 PM"]),
///     Student::new("Cy", ["W 3:00-4:20 PM"]),
/// ];
/// let csp = SectionCspBuilder::new(&slots, &students).with_min_group_size(2).build();
///
/// let outcome = BacktrackingSolver::new().solve_all(&csp, NoOpMonitor);
/// assert_eq!(outcome.solutions.len(), 1);
/// assert_eq!(outcome.solutions[0].time_of(0).as_str(), "W 3:00-4:20 PM");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    order: VariableOrder,
}

impl BacktrackingSolver {
    /// Creates a solver that branches on facilitator slots first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variable order.
    pub fn with_variable_order(mut self, order: VariableOrder) -> Self {
        self.order = order;
        self
    }

    /// Starts a lazy search. Each call restarts from scratch.
    pub fn solutions<'a, M: SearchMonitor>(
        &self,
        csp: &'a SectionCsp,
        monitor: M,
    ) -> SolutionIter<'a, M> {
        SolutionIter::new(csp, self.order.arrange(csp), monitor)
    }

    /// Runs the search to completion (or until a monitor stops it).
    pub fn solve_all<M: SearchMonitor>(&self, csp: &SectionCsp, monitor: M) -> SearchOutcome {
        let mut iter = self.solutions(csp, monitor);
        let solutions: Vec<Solution> = iter.by_ref().collect();
        SearchOutcome {
            solutions,
            termination: iter
                .termination()
                .cloned()
                .unwrap_or(Termination::Exhausted),
            statistics: iter.statistics().clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fresh,
    Running,
    Done,
}

/// Lazy sequence of solutions.
///
/// Holds the only mutable search state: the binding and a per-depth
/// cursor into each domain.
#[derive(Debug)]
pub struct SolutionIter<'a, M> {
    csp: &'a SectionCsp,
    order: Vec<VarRef>,
    /// Constraints to check at each depth (their scope closes there).
    checks_at: Vec<Vec<usize>>,
    /// Constraints with an empty scope, checked once up front.
    root_checks: Vec<usize>,
    binding: Binding,
    next_value: Vec<usize>,
    depth: usize,
    phase: Phase,
    monitor: M,
    statistics: SearchStatistics,
    termination: Option<Termination>,
}

impl<'a, M: SearchMonitor> SolutionIter<'a, M> {
    fn new(csp: &'a SectionCsp, order: Vec<VarRef>, monitor: M) -> Self {
        let mut position = vec![0usize; csp.variable_count()];
        for (depth, var) in order.iter().enumerate() {
            position[flat_index(csp, *var)] = depth;
        }

        let mut checks_at = vec![Vec::new(); order.len()];
        let mut root_checks = Vec::new();
        for (c, constraint) in csp.constraints().iter().enumerate() {
            let closes_at = constraint
                .scope(csp)
                .into_iter()
                .map(|var| position[flat_index(csp, var)])
                .max();
            match closes_at {
                Some(depth) => checks_at[depth].push(c),
                None => root_checks.push(c),
            }
        }

        Self {
            csp,
            next_value: vec![0; order.len()],
            order,
            checks_at,
            root_checks,
            binding: Binding::new(csp.slot_count(), csp.student_count()),
            depth: 0,
            phase: Phase::Fresh,
            monitor,
            statistics: SearchStatistics::default(),
            termination: None,
        }
    }

    /// How the search ended, once it has.
    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Counters so far.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// The attached monitor.
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    fn satisfied(&self, checks: &[usize]) -> bool {
        let constraints = self.csp.constraints();
        checks
            .iter()
            .all(|&c| constraints[c].is_satisfied(self.csp, &self.binding))
    }

    fn finish(&mut self, termination: Termination) {
        trace!(
            "search finished ({:?}): {} nodes, {} backtracks, {} solutions",
            termination,
            self.statistics.nodes_explored,
            self.statistics.backtracks,
            self.statistics.solutions_found
        );
        self.phase = Phase::Done;
        self.termination = Some(termination);
        self.monitor.on_exit_search();
    }

    fn emit(&mut self) -> Solution {
        let slot_times = self
            .binding
            .slot_times()
            .iter()
            .zip(self.csp.slot_variables())
            .map(|(value, var)| var.domain[value.unwrap_or_default()].clone())
            .collect();
        let student_slots = self
            .binding
            .student_slots()
            .iter()
            .map(|value| value.unwrap_or_default())
            .collect();
        let solution = Solution::new(slot_times, student_slots);

        self.statistics.solutions_found += 1;
        self.monitor.on_solution_found(&solution);
        solution
    }

    /// Advances the depth-first search to the next complete binding.
    fn advance(&mut self) -> Option<Solution> {
        loop {
            self.monitor.on_step();
            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                self.finish(Termination::Terminated(reason));
                return None;
            }

            let var = self.order[self.depth];
            let value = self.next_value[self.depth];

            if value >= self.csp.domain_size(var) {
                self.binding.unbind(var);
                self.next_value[self.depth] = 0;
                if self.depth == 0 {
                    self.finish(Termination::Exhausted);
                    return None;
                }
                self.depth -= 1;
                self.statistics.backtracks += 1;
                continue;
            }

            self.next_value[self.depth] = value + 1;
            self.binding.bind(var, value);
            self.statistics.nodes_explored += 1;

            if !self.satisfied(&self.checks_at[self.depth]) {
                self.statistics.constraint_failures += 1;
                continue;
            }

            if self.depth + 1 == self.order.len() {
                return Some(self.emit());
            }
            self.depth += 1;
        }
    }
}

impl<M: SearchMonitor> Iterator for SolutionIter<'_, M> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        let started = Instant::now();

        let result = match self.phase {
            Phase::Done => return None,
            Phase::Fresh => {
                self.phase = Phase::Running;
                self.monitor.on_enter_search(self.csp);

                if !self.satisfied(&self.root_checks) {
                    self.finish(Termination::Exhausted);
                    None
                } else if self.order.is_empty() {
                    let solution = self.emit();
                    self.finish(Termination::Exhausted);
                    Some(solution)
                } else {
                    self.advance()
                }
            }
            Phase::Running => self.advance(),
        };

        self.statistics.duration += started.elapsed();
        result
    }
}

/// Flat index of a variable: slots first, then students.
#[inline]
fn flat_index(csp: &SectionCsp, var: VarRef) -> usize {
    match var {
        VarRef::Slot(i) => i,
        VarRef::Student(i) => csp.slot_count() + i,
    }
}
