//! Search monitors.
//!
//! A monitor observes the search through shared references and steers it
//! only through [`SearchMonitor::search_command`], which the solver polls
//! before every assignment and every backtrack. This is how progress
//! display, solution caps, and cancellation hook in.

use log::info;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{SectionCsp, Solution};
use crate::scheduler::ProgressEstimator;

/// What the solver should do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observer of a backtracking search.
pub trait SearchMonitor {
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, csp: &SectionCsp);
    fn on_exit_search(&mut self);
    fn on_solution_found(&mut self, solution: &Solution);
    fn on_step(&mut self);
    fn search_command(&self) -> SearchCommand;
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<M> SearchMonitor for &mut M
where
    M: SearchMonitor + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, csp: &SectionCsp) {
        (**self).on_enter_search(csp)
    }

    fn on_exit_search(&mut self) {
        (**self).on_exit_search()
    }

    fn on_solution_found(&mut self, solution: &Solution) {
        (**self).on_solution_found(solution)
    }

    fn on_step(&mut self) {
        (**self).on_step()
    }

    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

/// A monitor that never interferes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_enter_search(&mut self, _csp: &SectionCsp) {}
    fn on_exit_search(&mut self) {}
    fn on_solution_found(&mut self, _solution: &Solution) {}
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

/// Terminates the search once the shared flag is set.
///
/// The flag can be raised from another thread (a signal handler, a UI
/// cancel button) while the search runs.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self { stop_flag }
    }
}

impl SearchMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _csp: &SectionCsp) {}
    fn on_exit_search(&mut self) {}
    fn on_solution_found(&mut self, _solution: &Solution) {}
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

/// Terminates the search after a fixed number of solutions.
#[derive(Debug, Clone)]
pub struct SolutionLimitMonitor {
    solutions_found: u64,
    solution_limit: u64,
}

impl SolutionLimitMonitor {
    pub fn new(solution_limit: u64) -> Self {
        Self {
            solutions_found: 0,
            solution_limit,
        }
    }

    #[inline]
    fn reached_limit(&self) -> bool {
        self.solutions_found >= self.solution_limit
    }
}

impl SearchMonitor for SolutionLimitMonitor {
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _csp: &SectionCsp) {
        self.solutions_found = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &Solution) {
        self.solutions_found += 1;
    }

    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate(format!("solution limit of {} reached", self.solution_limit))
        } else {
            SearchCommand::Continue
        }
    }
}

/// Logs found-versus-estimated progress.
///
/// The estimate comes from a solution-density constant and may be far off
/// for rosters unlike the one it was measured on.
#[derive(Debug, Clone)]
pub struct ProgressMonitor {
    estimator: ProgressEstimator,
    log_every: u64,
    solutions_found: u64,
    expected: f64,
}

impl ProgressMonitor {
    /// Logs every `log_every` solutions (at least 1).
    pub fn new(estimator: ProgressEstimator, log_every: u64) -> Self {
        Self {
            estimator,
            log_every: log_every.max(1),
            solutions_found: 0,
            expected: 0.0,
        }
    }

    /// Solutions seen so far.
    pub fn solutions_found(&self) -> u64 {
        self.solutions_found
    }

    /// Estimated total for the current search.
    pub fn expected_solutions(&self) -> f64 {
        self.expected
    }

    /// Percent of the estimate reached, if the estimate is positive.
    pub fn percent_complete(&self) -> Option<f64> {
        self.estimator
            .progress(self.solutions_found, self.expected)
            .map(|ratio| ratio * 100.0)
    }
}

impl SearchMonitor for ProgressMonitor {
    fn name(&self) -> &str {
        "ProgressMonitor"
    }

    fn on_enter_search(&mut self, csp: &SectionCsp) {
        self.solutions_found = 0;
        self.expected = self.estimator.estimate(csp.possible_configurations());
        info!("Estimated solutions: {:.0}", self.expected);
    }

    fn on_exit_search(&mut self) {
        info!("Found {} solutions!", self.solutions_found);
    }

    fn on_solution_found(&mut self, _solution: &Solution) {
        self.solutions_found += 1;
        if self.solutions_found % self.log_every == 0 {
            match self.percent_complete() {
                Some(percent) => info!(
                    "Found {} solutions! Progress: {:.2}%",
                    self.solutions_found, percent
                ),
                None => info!("Found {} solutions!", self.solutions_found),
            }
        }
    }

    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

/// Fans events out to several monitors; the first `Terminate` wins.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl<'a> CompositeMonitor<'a> {
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    pub fn with_monitor(mut self, monitor: impl SearchMonitor + 'a) -> Self {
        self.monitors.push(Box::new(monitor));
        self
    }

    pub fn add_monitor(&mut self, monitor: impl SearchMonitor + 'a) {
        self.monitors.push(Box::new(monitor));
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, csp: &SectionCsp) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(csp);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, solution: &Solution) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        self.monitors
            .iter()
            .map(|m| m.search_command())
            .find(|c| matches!(c, SearchCommand::Terminate(_)))
            .unwrap_or(SearchCommand::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_solution() -> Solution {
        Solution::new(Vec::new(), Vec::new())
    }

    #[test]
    fn test_interrupt_monitor() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);

        flag.store(true, Ordering::Relaxed);
        match monitor.search_command() {
            SearchCommand::Terminate(reason) => assert_eq!(reason, "Interrupt signal received"),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_solution_limit_monitor() {
        let mut monitor = SolutionLimitMonitor::new(2);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);

        monitor.on_solution_found(&dummy_solution());
        assert_eq!(monitor.search_command(), SearchCommand::Continue);

        monitor.on_solution_found(&dummy_solution());
        assert!(matches!(monitor.search_command(), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_composite_first_terminate_wins() {
        let flag = AtomicBool::new(false);
        let mut composite = CompositeMonitor::new()
            .with_monitor(NoOpMonitor)
            .with_monitor(InterruptMonitor::new(&flag))
            .with_monitor(SolutionLimitMonitor::new(1));
        assert_eq!(composite.len(), 3);
        assert_eq!(composite.search_command(), SearchCommand::Continue);

        composite.on_solution_found(&dummy_solution());
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("solution limit of 1 reached".to_string())
        );

        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("Interrupt signal received".to_string())
        );
    }

    #[test]
    fn test_progress_monitor_counts() {
        let mut monitor = ProgressMonitor::new(ProgressEstimator::new(0.5), 1);
        monitor.expected = 4.0;
        monitor.on_solution_found(&dummy_solution());
        monitor.on_solution_found(&dummy_solution());

        assert_eq!(monitor.solutions_found(), 2);
        let percent = monitor.percent_complete().unwrap();
        assert!((percent - 50.0).abs() < 1e-10);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_command_display() {
        assert_eq!(SearchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            SearchCommand::Terminate("done".into()).to_string(),
            "Terminate: done"
        );
    }
}
