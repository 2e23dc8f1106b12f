//! Section proposal and reporting.
//!
//! - [`SectionPlanner`]: roster → pruning → CSP → solutions → report
//! - [`TimeDistribution`]: per-slot time frequencies over all solutions
//! - [`ProgressEstimator`]: advisory solution-count estimate
//! - [`section_options`]: which locked-in sections each student can attend

mod aggregate;
mod availability;
mod planner;
mod progress;

pub use aggregate::{SlotTimeCounts, TimeDistribution};
pub use availability::{section_options, LockedSection, StudentOptions};
pub use planner::{Proposal, ProposalReport, SectionPlanner};
pub use progress::{ProgressEstimator, DEFAULT_SOLUTION_DENSITY};
