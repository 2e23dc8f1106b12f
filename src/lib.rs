//! Discussion-section scheduling as an exhaustive constraint search.
//!
//! Given students and facilitators with weekly availability, enumerates
//! every way to assign students to facilitator-led sections so that each
//! student attends a time they can make and every section meets a minimum
//! size. The solutions are then reduced to per-section time frequencies,
//! which show the meeting times that keep the most rosters satisfiable.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeSlot`, `Student`, `Facilitator`,
//!   `FacilitatorSlot`, `Roster`, `RosterRecord`
//! - **`validation`**: Roster integrity checks (duplicate and colliding ids)
//! - **`pruning`**: Availability-band filter that bounds the search space
//! - **`cp`**: CSP model, constraints, backtracking solver, search monitors
//! - **`scheduler`**: End-to-end planner, time aggregation, progress estimate
//! - **`config`**: Planner settings
//! - **`error`**: Error types
//!
//! # Pipeline
//!
//! ```text
//! RosterRecord* ─▶ Roster ─▶ validate ─▶ prune ─▶ SectionCsp ─▶ Solution* ─▶ TimeDistribution
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Dechter (2003), "Constraint Processing"

pub mod config;
pub mod cp;
pub mod error;
pub mod models;
pub mod pruning;
pub mod scheduler;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{RosterError, SchedulingError};
