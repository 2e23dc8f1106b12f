//! Planner configuration.
//!
//! All fields have defaults matching the sign-up round the density
//! constant was measured on, so a partial config deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::cp::VariableOrder;
use crate::pruning::AvailabilityBand;
use crate::scheduler::DEFAULT_SOLUTION_DENSITY;

/// Default minimum number of students in a section.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 3;

/// Settings for a section-proposal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Sections with fewer students are invalid.
    pub min_group_size: usize,
    /// Students outside this availability-count band are pruned.
    pub availability: AvailabilityBand,
    /// Solutions per possible configuration, for progress estimates.
    pub solution_density: f64,
    /// Stop after this many solutions. `None` enumerates everything.
    pub max_solutions: Option<u64>,
    /// Branching order.
    pub variable_order: VariableOrder,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            availability: AvailabilityBand::default(),
            solution_density: DEFAULT_SOLUTION_DENSITY,
            max_solutions: None,
            variable_order: VariableOrder::default(),
        }
    }
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum group size.
    pub fn with_min_group_size(mut self, min_group_size: usize) -> Self {
        self.min_group_size = min_group_size;
        self
    }

    /// Sets the availability band.
    pub fn with_availability(mut self, min: usize, max: usize) -> Self {
        self.availability = AvailabilityBand::new(min, max);
        self
    }

    /// Sets the solution density.
    pub fn with_solution_density(mut self, density: f64) -> Self {
        self.solution_density = density;
        self
    }

    /// Caps the number of solutions.
    pub fn with_max_solutions(mut self, max_solutions: u64) -> Self {
        self.max_solutions = Some(max_solutions);
        self
    }

    /// Sets the variable order.
    pub fn with_variable_order(mut self, order: VariableOrder) -> Self {
        self.variable_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.min_group_size, 3);
        assert_eq!(config.availability, AvailabilityBand::new(5, 12));
        assert_eq!(config.max_solutions, None);
        assert_eq!(config.variable_order, VariableOrder::FacilitatorsFirst);
    }

    #[test]
    fn test_builder() {
        let config = PlannerConfig::new()
            .with_min_group_size(2)
            .with_availability(1, 4)
            .with_solution_density(0.5)
            .with_max_solutions(10)
            .with_variable_order(VariableOrder::Shuffled { seed: 3 });

        assert_eq!(config.min_group_size, 2);
        assert_eq!(config.availability, AvailabilityBand::new(1, 4));
        assert!((config.solution_density - 0.5).abs() < 1e-12);
        assert_eq!(config.max_solutions, Some(10));
    }

    #[test]
    fn test_partial_json() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "min_group_size": 2, "availability": { "min": 1, "max": 6 } }"#)
                .unwrap();

        assert_eq!(config.min_group_size, 2);
        assert_eq!(config.availability, AvailabilityBand::new(1, 6));
        assert_eq!(config.solution_density, DEFAULT_SOLUTION_DENSITY);
    }

    #[test]
    fn test_json_roundtrip_with_order() {
        let config = PlannerConfig::new()
            .with_solution_density(0.125)
            .with_variable_order(VariableOrder::Shuffled { seed: 9 });
        let json = serde_json::to_string(&config).unwrap();
        let back: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
