//! @ai:module:intent Test execution statistics for runs sharing a generator and stop coverage
//! @ai:module:layer domain
//! @ai:module:public_api RunGroup
//! @ai:module:stateless true

use crate::benchmark::RunRecord;
use serde::{Deserialize, Serialize};

/// @ai:intent Test execution durations of one (algorithm, stop coverage) bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunGroup {
    pub algorithm: String,
    pub stop_coverage: u32,
    /// Suite duration in microseconds of every run that executed tests
    pub test_durations: Vec<u64>,
    /// Every run in the bucket completed its generated test suite
    pub successful_runs: bool,
}

impl RunGroup {
    /// @ai:intent Build a run group from the runs of one generator group
    /// @ai:effects pure
    /// @ai:post None when no run in the bucket executed tests
    pub fn from_runs(algorithm: &str, stop_coverage: u32, runs: &[RunRecord]) -> Option<Self> {
        if !runs.iter().any(RunRecord::has_test_results) {
            return None;
        }

        let test_durations = runs
            .iter()
            .filter(|r| r.has_test_results())
            .map(RunRecord::test_suite_duration)
            .collect();

        Some(Self {
            algorithm: algorithm.to_string(),
            stop_coverage,
            test_durations,
            successful_runs: runs.iter().all(RunRecord::tests_completed),
        })
    }

    pub fn average_test_duration(&self) -> f64 {
        if self.test_durations.is_empty() {
            0.0
        } else {
            self.test_durations.iter().sum::<u64>() as f64 / self.test_durations.len() as f64
        }
    }

    pub fn minimum_test_duration(&self) -> u64 {
        self.test_durations.iter().copied().min().unwrap_or(0)
    }

    pub fn maximum_test_duration(&self) -> u64 {
        self.test_durations.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{ModelInfo, RunReport, TestResults};
    use std::collections::BTreeMap;

    fn run(results: &[(&str, Option<u64>)]) -> RunRecord {
        RunRecord::new(
            vec![],
            RunReport {
                generator: "Weighted".to_string(),
                stop_coverage: 100,
                generation_time: 5,
                coverage: 100.0,
                model: ModelInfo::default(),
                vertex_visits: BTreeMap::new(),
                edge_visits: BTreeMap::new(),
            },
            results
                .iter()
                .map(|(id, d)| (id.to_string(), *d))
                .collect::<TestResults>(),
        )
    }

    #[test]
    fn test_no_test_results_means_no_group() {
        assert!(RunGroup::from_runs("Weighted", 100, &[run(&[]), run(&[])]).is_none());
    }

    #[test]
    fn test_durations_and_success() {
        let runs = [
            run(&[("a", Some(10)), ("b", Some(20))]),
            run(&[("a", Some(40))]),
        ];
        let group = RunGroup::from_runs("Weighted", 100, &runs).unwrap();

        assert_eq!(group.test_durations, vec![30, 40]);
        assert!(group.successful_runs);
        assert!((group.average_test_duration() - 35.0).abs() < 1e-9);
        assert_eq!(group.minimum_test_duration(), 30);
        assert_eq!(group.maximum_test_duration(), 40);
    }

    #[test]
    fn test_failed_or_missing_runs_are_unsuccessful() {
        let failed = [run(&[("a", Some(10))]), run(&[("a", None)])];
        assert!(!RunGroup::from_runs("Weighted", 100, &failed).unwrap().successful_runs);

        let missing = [run(&[("a", Some(10))]), run(&[])];
        let group = RunGroup::from_runs("Weighted", 100, &missing).unwrap();
        assert!(!group.successful_runs);
        assert_eq!(group.test_durations, vec![10]);
    }
}
