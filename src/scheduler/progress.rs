//! Solution-count estimation for progress display.
//!
//! The expected number of solutions is `density × possible_configurations`,
//! where the density was measured on a previous run. The estimate is
//! advisory: it bounds nothing and can be far off for a roster of a
//! different shape.

use serde::{Deserialize, Serialize};

/// Solutions per unconstrained configuration observed on a reference run
/// (8364 solutions out of 22,617,340,087,890,625,000 configurations).
pub const DEFAULT_SOLUTION_DENSITY: f64 = 8364.0 / 22_617_340_087_890_625_000.0;

/// Estimates total solution count from the search-space size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEstimator {
    /// Ratio of solutions to possible configurations.
    pub density: f64,
}

impl ProgressEstimator {
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    /// Expected number of solutions.
    pub fn estimate(&self, possible_configurations: u128) -> f64 {
        self.density * possible_configurations as f64
    }

    /// Fraction of the estimate reached, or `None` when the estimate is not positive.
    pub fn progress(&self, found: u64, expected: f64) -> Option<f64> {
        if expected > 0.0 && expected.is_finite() {
            Some(found as f64 / expected)
        } else {
            None
        }
    }
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_SOLUTION_DENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_run_reproduces() {
        let estimator = ProgressEstimator::default();
        let expected = estimator.estimate(22_617_340_087_890_625_000);
        assert!((expected - 8364.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_scales_linearly() {
        let estimator = ProgressEstimator::new(0.25);
        assert!((estimator.estimate(0) - 0.0).abs() < 1e-10);
        assert!((estimator.estimate(400) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_progress() {
        let estimator = ProgressEstimator::new(0.5);
        assert_eq!(estimator.progress(5, 0.0), None);
        let ratio = estimator.progress(5, 20.0).unwrap();
        assert!((ratio - 0.25).abs() < 1e-10);
        // Overshooting the estimate is allowed.
        assert!(estimator.progress(40, 20.0).unwrap() > 1.0);
    }
}
