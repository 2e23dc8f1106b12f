//! End-to-end section proposal.
//!
//! # Algorithm
//!
//! 1. Validate the roster (fatal on any problem).
//! 2. Prune students outside the availability band.
//! 3. Expand facilitators into slots and build the CSP.
//! 4. Enumerate every solution, reporting progress against the estimate.
//! 5. If any solution exists, reduce them to per-slot time frequencies.
//!
//! An empty solution set is a normal outcome: the report says so and no
//! distribution is computed.

use log::info;

use super::{ProgressEstimator, TimeDistribution};
use crate::config::PlannerConfig;
use crate::cp::{
    BacktrackingSolver, CompositeMonitor, NoOpMonitor, SearchMonitor, SearchStatistics,
    SectionCsp, SectionCspBuilder, Solution, SolutionLimitMonitor, Termination,
};
use crate::error::SchedulingError;
use crate::models::{Roster, RosterRecord};
use crate::pruning::{prune_students, PruneSummary, RemovalReason};
use crate::validation::validate_roster;

/// Summary of a proposal run, handed to reporting as plain data.
#[derive(Debug, Clone)]
pub struct ProposalReport {
    /// Kept and removed student counts.
    pub pruning: PruneSummary,
    /// Removed students with the reason, in roster order.
    pub removed_students: Vec<(String, RemovalReason)>,
    /// Product of all domain sizes (saturating).
    pub possible_configurations: u128,
    /// Advisory solution-count estimate.
    pub estimated_solutions: f64,
    /// Solutions actually found.
    pub solutions_found: u64,
    pub termination: Termination,
    pub statistics: SearchStatistics,
    /// Per-slot time frequencies; `None` when no solution exists.
    pub distribution: Option<TimeDistribution>,
}

impl ProposalReport {
    /// Whether at least one solution was found.
    #[inline]
    pub fn has_solutions(&self) -> bool {
        self.solutions_found > 0
    }
}

/// A finished run: the CSP, its solutions, and the report.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub csp: SectionCsp,
    /// Solutions in discovery order.
    pub solutions: Vec<Solution>,
    pub report: ProposalReport,
}

/// Proposes discussion-section times for a roster.
///
/// # Example
///
/// ```
/// use section_csp::config::PlannerConfig;
/// use section_csp::models::RosterRecord;
/// use section_csp::scheduler::SectionPlanner;
///
/// let records = vec![
///     RosterRecord::facilitator("Ada", "M 3:00-4:20 PM,W 3:00-4:20 PM", "1"),
///     RosterRecord::student("Bo", "M 3:00-4:20 PM"),
///     RosterRecord::student("Cy", "M 3:00-4:20 PM,W 3:00-4:20 PM"),
/// ];
/// let planner = SectionPlanner::new(
///     PlannerConfig::new().with_min_group_size(2).with_availability(1, 5),
/// );
///
/// let proposal = planner.propose_records(&records).unwrap();
/// assert_eq!(proposal.report.solutions_found, 1);
/// let best = proposal.report.distribution.unwrap().best_times();
/// assert_eq!(best[0].time.as_str(), "M 3:00-4:20 PM");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionPlanner {
    config: PlannerConfig,
}

impl SectionPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds the roster from raw rows, then proposes.
    pub fn propose_records(&self, records: &[RosterRecord]) -> Result<Proposal, SchedulingError> {
        let roster = Roster::from_records(records)?;
        self.propose(&roster)
    }

    /// Proposes sections without extra monitoring.
    pub fn propose(&self, roster: &Roster) -> Result<Proposal, SchedulingError> {
        self.propose_with_monitor(roster, NoOpMonitor)
    }

    /// Proposes sections, reporting search events to `monitor`.
    ///
    /// # Errors
    /// [`SchedulingError::Validation`] if the roster is inconsistent. No
    /// search is started in that case.
    pub fn propose_with_monitor<M: SearchMonitor>(
        &self,
        roster: &Roster,
        monitor: M,
    ) -> Result<Proposal, SchedulingError> {
        validate_roster(roster)?;

        let pruned = prune_students(&roster.students, self.config.availability);
        let slots = roster.facilitator_slots();
        let csp = SectionCspBuilder::new(&slots, &pruned.kept)
            .with_min_group_size(self.config.min_group_size)
            .build();

        let possible_configurations = csp.possible_configurations();
        let estimated_solutions =
            ProgressEstimator::new(self.config.solution_density).estimate(possible_configurations);

        let mut monitors = CompositeMonitor::new().with_monitor(monitor);
        if let Some(limit) = self.config.max_solutions {
            monitors.add_monitor(SolutionLimitMonitor::new(limit));
        }

        let outcome = BacktrackingSolver::new()
            .with_variable_order(self.config.variable_order)
            .solve_all(&csp, monitors);

        let solutions_found = outcome.solutions.len() as u64;
        info!("Found {} solutions!", solutions_found);
        if let Termination::Terminated(reason) = &outcome.termination {
            info!("Search stopped early: {}", reason);
        }

        let distribution = if outcome.solutions.is_empty() {
            info!("No solutions found");
            None
        } else {
            TimeDistribution::from_solutions(&csp, &outcome.solutions)
        };

        let report = ProposalReport {
            pruning: pruned.summary(),
            removed_students: pruned
                .removed
                .iter()
                .map(|(student, reason)| (student.name.clone(), *reason))
                .collect(),
            possible_configurations,
            estimated_solutions,
            solutions_found,
            termination: outcome.termination,
            statistics: outcome.statistics,
            distribution,
        };

        Ok(Proposal {
            csp,
            solutions: outcome.solutions,
            report,
        })
    }
}
