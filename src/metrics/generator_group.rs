//! @ai:module:intent Derived statistics for all runs sharing a generator and stop coverage
//! @ai:module:layer domain
//! @ai:module:public_api GeneratorGroup
//! @ai:module:stateless true

use crate::benchmark::RunRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Bucket of runs keyed by (generator, stop coverage)
/// @ai:invariant every run has the same generator name and stop coverage as the group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorGroup {
    pub generator: String,
    pub stop_coverage: u32,
    pub runs: Vec<RunRecord>,
}

impl GeneratorGroup {
    /// @ai:intent Create an empty group for a generator and stop coverage
    /// @ai:effects pure
    pub fn new(generator: impl Into<String>, stop_coverage: u32) -> Self {
        Self {
            generator: generator.into(),
            stop_coverage,
            runs: Vec::new(),
        }
    }

    /// @ai:intent Add a run belonging to this group
    /// @ai:pre run matches the group's generator and stop coverage
    /// @ai:effects state:write
    pub fn push(&mut self, run: RunRecord) {
        debug_assert_eq!(run.report.generator, self.generator);
        debug_assert_eq!(run.report.stop_coverage, self.stop_coverage);
        self.runs.push(run);
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    fn generation_times(&self) -> impl Iterator<Item = u64> + '_ {
        self.runs.iter().map(|r| r.report.generation_time)
    }

    fn test_suite_sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.runs.iter().map(RunRecord::test_suite_size)
    }

    pub fn total_generation_time(&self) -> u64 {
        self.generation_times().sum()
    }

    pub fn average_generation_time(&self) -> f64 {
        average(self.total_generation_time(), self.run_count())
    }

    pub fn min_generation_time(&self) -> u64 {
        self.generation_times().min().unwrap_or(0)
    }

    pub fn max_generation_time(&self) -> u64 {
        self.generation_times().max().unwrap_or(0)
    }

    pub fn total_test_suite_size(&self) -> u64 {
        self.test_suite_sizes().sum()
    }

    pub fn average_test_suite_size(&self) -> f64 {
        average(self.total_test_suite_size(), self.run_count())
    }

    pub fn min_test_suite_size(&self) -> u64 {
        self.test_suite_sizes().min().unwrap_or(0)
    }

    pub fn max_test_suite_size(&self) -> u64 {
        self.test_suite_sizes().max().unwrap_or(0)
    }

    /// @ai:intent Generated elements per microsecond, `None` when the average time is zero
    /// @ai:effects pure
    pub fn size_over_time(&self) -> Option<f64> {
        let time = self.average_generation_time();

        if time == 0.0 {
            None
        } else {
            Some(self.average_test_suite_size() / time)
        }
    }

    /// @ai:intent Vertex id to visit count summed over all runs
    /// @ai:effects pure
    pub fn total_vertex_visits(&self) -> BTreeMap<String, u64> {
        sum_visits(self.runs.iter().map(|r| &r.report.vertex_visits))
    }

    /// @ai:intent Edge id to visit count summed over all runs
    /// @ai:effects pure
    pub fn total_edge_visits(&self) -> BTreeMap<String, u64> {
        sum_visits(self.runs.iter().map(|r| &r.report.edge_visits))
    }

    /// @ai:intent Vertex id to mean visit count per run
    /// @ai:effects pure
    pub fn average_vertex_visits(&self) -> BTreeMap<String, f64> {
        average_visits(&self.total_vertex_visits(), self.run_count())
    }

    /// @ai:intent Edge id to mean visit count per run
    /// @ai:effects pure
    pub fn average_edge_visits(&self) -> BTreeMap<String, f64> {
        average_visits(&self.total_edge_visits(), self.run_count())
    }

    /// @ai:intent Percentage of model vertices visited in an average traversal
    /// @ai:effects pure
    pub fn vertex_visit_percentage(&self, model_vertices: u64) -> Option<f64> {
        visited_percentage(&self.average_vertex_visits(), model_vertices)
    }

    /// @ai:intent Percentage of model edges visited in an average traversal
    /// @ai:effects pure
    pub fn edge_visit_percentage(&self, model_edges: u64) -> Option<f64> {
        visited_percentage(&self.average_edge_visits(), model_edges)
    }
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

fn sum_visits<'a, I>(maps: I) -> BTreeMap<String, u64>
where
    I: Iterator<Item = &'a BTreeMap<String, u64>>,
{
    let mut totals = BTreeMap::new();

    for map in maps {
        for (id, visits) in map {
            *totals.entry(id.clone()).or_insert(0) += visits;
        }
    }

    totals
}

fn average_visits(totals: &BTreeMap<String, u64>, count: usize) -> BTreeMap<String, f64> {
    totals
        .iter()
        .map(|(id, total)| (id.clone(), average(*total, count)))
        .collect()
}

/// Counts every element with a nonzero average; rounding only happens in histograms.
fn visited_percentage(average_visits: &BTreeMap<String, f64>, model_count: u64) -> Option<f64> {
    if model_count == 0 {
        return None;
    }

    let visited = average_visits.values().filter(|v| **v != 0.0).count();
    Some(visited as f64 / model_count as f64 * 100.0)
}
