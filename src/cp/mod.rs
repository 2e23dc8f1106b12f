//! CP formulation and exhaustive search for section scheduling.
//!
//! Translates facilitator slots and kept students into a finite-domain
//! CSP, then enumerates every consistent total assignment with an explicit
//! backtracking search.
//!
//! # Key Components
//!
//! - **Model**: [`SectionCsp`], built by [`SectionCspBuilder`]
//! - **Constraints**: [`AvailabilityConstraint`], [`GroupSizeConstraint`],
//!   evaluated through [`ConstraintCheck`]
//! - **Solver**: [`BacktrackingSolver`] producing a lazy [`SolutionIter`]
//! - **Monitors**: [`SearchMonitor`] hooks for progress, limits, cancellation
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

mod constraint;
mod model;
mod monitor;
mod solver;

pub use constraint::{
    AvailabilityConstraint, Binding, Constraint, ConstraintCheck, GroupSizeConstraint,
};
pub use model::{SectionCsp, SectionCspBuilder, SlotVariable, StudentVariable, VarRef};
pub use monitor::{
    CompositeMonitor, InterruptMonitor, NoOpMonitor, ProgressMonitor, SearchCommand,
    SearchMonitor, SolutionLimitMonitor,
};
pub use solver::{
    BacktrackingSolver, SearchOutcome, SearchStatistics, Solution, SolutionIter, Termination,
    VariableOrder,
};
