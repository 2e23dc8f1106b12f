//! Per-slot time frequencies across a solution set.
//!
//! For each facilitator slot, counts how many solutions place it at each
//! time. Times chosen in many solutions leave more rosters satisfiable, so
//! they are the natural ones to lock in.
//!
//! # Output
//!
//! | Field | Definition |
//! |-------|-----------|
//! | `slots[i].counts` | (time, solutions choosing it) for slot i, canonical order |
//! | `times` | Union of chosen times over all slots, canonical order |
//! | `solution_count` | Number of solutions reduced |
//!
//! The reduction is pure: solutions are read, never mutated, and a fresh
//! distribution is returned.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::LockedSection;
use crate::cp::{SectionCsp, Solution};
use crate::models::TimeSlot;

/// Chosen-time counts for one facilitator slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTimeCounts {
    /// Facilitator slot id.
    pub slot_id: String,
    /// `(time, count)` for every time chosen at least once, in canonical order.
    pub counts: Vec<(TimeSlot, u64)>,
}

impl SlotTimeCounts {
    /// Solutions that place this slot at `time`.
    pub fn count(&self, time: &TimeSlot) -> u64 {
        self.counts
            .iter()
            .find(|(t, _)| t == time)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// The most frequently chosen time; ties go to the earliest.
    pub fn best_time(&self) -> Option<&TimeSlot> {
        self.counts
            .iter()
            .rev()
            .max_by_key(|(_, n)| *n)
            .map(|(t, _)| t)
    }
}

/// Time frequencies for every facilitator slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDistribution {
    /// One entry per facilitator slot, in CSP order.
    pub slots: Vec<SlotTimeCounts>,
    /// Every time chosen by any slot, in canonical order.
    pub times: Vec<TimeSlot>,
    /// Number of solutions reduced.
    pub solution_count: u64,
}

impl TimeDistribution {
    /// Reduces a solution set.
    ///
    /// Returns `None` for an empty set; there is nothing to aggregate.
    pub fn from_solutions(csp: &SectionCsp, solutions: &[Solution]) -> Option<Self> {
        if solutions.is_empty() {
            return None;
        }

        let tallies: Vec<BTreeMap<TimeSlot, u64>> = solutions.iter().fold(
            vec![BTreeMap::new(); csp.slot_count()],
            |mut tallies, solution| {
                for (tally, time) in tallies.iter_mut().zip(solution.slot_times()) {
                    *tally.entry(time.clone()).or_insert(0) += 1;
                }
                tallies
            },
        );

        let times: BTreeSet<TimeSlot> = tallies
            .iter()
            .flat_map(|tally| tally.keys().cloned())
            .collect();

        let slots: Vec<SlotTimeCounts> = csp
            .slot_variables()
            .iter()
            .zip(tallies)
            .map(|(var, tally)| SlotTimeCounts {
                slot_id: var.id.clone(),
                counts: tally.into_iter().collect(),
            })
            .collect();

        for slot in &slots {
            for (time, count) in &slot.counts {
                debug!("{} - {}: {}", slot.slot_id, time, count);
            }
        }

        Some(Self {
            slots,
            times: times.into_iter().collect(),
            solution_count: solutions.len() as u64,
        })
    }

    /// Counts for the slot with the given id.
    pub fn slot(&self, slot_id: &str) -> Option<&SlotTimeCounts> {
        self.slots.iter().find(|s| s.slot_id == slot_id)
    }

    /// Solutions that place `slot_id` at `time`.
    pub fn count(&self, slot_id: &str, time: &TimeSlot) -> u64 {
        self.slot(slot_id).map(|s| s.count(time)).unwrap_or(0)
    }

    /// Counts for `slot_id` over every time in [`Self::times`], zero-filled.
    pub fn histogram(&self, slot_id: &str) -> Option<Vec<(&TimeSlot, u64)>> {
        let slot = self.slot(slot_id)?;
        Some(self.times.iter().map(|t| (t, slot.count(t))).collect())
    }

    /// The most frequent time for each slot.
    pub fn best_times(&self) -> Vec<LockedSection> {
        self.slots
            .iter()
            .filter_map(|s| {
                s.best_time()
                    .map(|time| LockedSection::new(s.slot_id.clone(), time.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{BacktrackingSolver, NoOpMonitor, SectionCspBuilder};
    use crate::models::{Facilitator, Student};

    const M: &str = "M 9:00-10:20 AM";
    const M_PM: &str = "M 1:30-2:50 PM";
    const TU: &str = "Tu 4:30-5:50 PM";
    const W: &str = "W 3:00-4:20 PM";

    fn make_csp() -> SectionCsp {
        let mut slots = Facilitator::new("Ada", [W, M]).slots();
        slots.extend(Facilitator::new("Eve", [TU, M_PM]).slots());
        let students = vec![Student::new("Bo", [M, TU]), Student::new("Cy", [W, M_PM])];
        SectionCspBuilder::new(&slots, &students)
            .with_min_group_size(0)
            .build()
    }

    fn solution(times: [&str; 2]) -> Solution {
        Solution::new(times.iter().map(|t| TimeSlot::new(*t)).collect(), vec![0, 1])
    }

    #[test]
    fn test_empty_set_is_none() {
        assert!(TimeDistribution::from_solutions(&make_csp(), &[]).is_none());
    }

    #[test]
    fn test_counts_and_order() {
        let csp = make_csp();
        let solutions = vec![
            solution([W, TU]),
            solution([M, TU]),
            solution([W, M_PM]),
            solution([W, TU]),
        ];

        let dist = TimeDistribution::from_solutions(&csp, &solutions).unwrap();
        assert_eq!(dist.solution_count, 4);

        let ada = dist.slot("Ada 1").unwrap();
        assert_eq!(
            ada.counts,
            vec![(TimeSlot::new(M), 1), (TimeSlot::new(W), 3)]
        );
        assert_eq!(dist.count("Eve 1", &TimeSlot::new(TU)), 3);
        assert_eq!(dist.count("Eve 1", &TimeSlot::new(W)), 0);
        assert_eq!(dist.count("Nobody", &TimeSlot::new(W)), 0);

        let labels: Vec<&str> = dist.times.iter().map(TimeSlot::as_str).collect();
        assert_eq!(labels, vec![M, M_PM, TU, W]);
    }

    #[test]
    fn test_histogram_zero_fills() {
        let csp = make_csp();
        let solutions = vec![solution([W, TU]), solution([M, TU])];
        let dist = TimeDistribution::from_solutions(&csp, &solutions).unwrap();

        let hist = dist.histogram("Eve 1").unwrap();
        let counts: Vec<u64> = hist.iter().map(|(_, n)| *n).collect();
        // Union is M, Tu, W.
        assert_eq!(counts, vec![0, 2, 0]);
        assert!(dist.histogram("Nobody").is_none());
    }

    #[test]
    fn test_counts_sum_to_solution_count() {
        let csp = make_csp();
        let solutions = BacktrackingSolver::new()
            .solve_all(&csp, NoOpMonitor)
            .solutions;
        let dist = TimeDistribution::from_solutions(&csp, &solutions).unwrap();

        for slot in &dist.slots {
            let total: u64 = slot.counts.iter().map(|(_, n)| n).sum();
            assert_eq!(total, dist.solution_count);
        }
    }

    #[test]
    fn test_input_untouched() {
        let csp = make_csp();
        let solutions = vec![solution([W, TU]), solution([M, M_PM])];
        let before = solutions.clone();

        let first = TimeDistribution::from_solutions(&csp, &solutions).unwrap();
        let second = TimeDistribution::from_solutions(&csp, &solutions).unwrap();
        assert_eq!(solutions, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_best_time_tie_goes_earliest() {
        let csp = make_csp();
        let solutions = vec![solution([W, TU]), solution([M, M_PM])];
        let dist = TimeDistribution::from_solutions(&csp, &solutions).unwrap();

        let best = dist.best_times();
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].time.as_str(), M);
        assert_eq!(best[1].time.as_str(), M_PM);
    }
}
