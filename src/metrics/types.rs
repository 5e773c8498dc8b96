//! @ai:module:intent Aggregate and statistics types for benchmark reports
//! @ai:module:layer domain
//! @ai:module:public_api Benchmark, BenchmarkReport, GroupedGenerators, GroupStatistics, RunGroupStatistics, StatisticsSummary
//! @ai:module:stateless true

use crate::benchmark::ModelInfo;
use crate::metrics::{GeneratorGroup, RunGroup};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Borrowed view of generator groups keyed by generator name
pub type GroupedGenerators<'a> = IndexMap<&'a str, &'a [GeneratorGroup]>;

/// @ai:intent Model metadata plus every generator group, grouped by generator name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub name: String,
    pub model: ModelInfo,
    /// Groups per generator, sorted by stop coverage
    pub generators: IndexMap<String, Vec<GeneratorGroup>>,
}

/// @ai:intent Complete benchmark: the grouped report and its test execution groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub report: BenchmarkReport,
    /// Sorted by stop coverage
    pub run_groups: Vec<RunGroup>,
}

impl Benchmark {
    pub fn name(&self) -> &str {
        &self.report.name
    }

    /// @ai:intent Borrow all generator groups keyed by generator name
    /// @ai:effects pure
    pub fn generators_grouped(&self) -> GroupedGenerators<'_> {
        self.report
            .generators
            .iter()
            .map(|(name, groups)| (name.as_str(), groups.as_slice()))
            .collect()
    }

    /// @ai:intent Whether every test execution group completed all of its suites
    /// @ai:effects pure
    pub fn all_runs_successful(&self) -> bool {
        self.run_groups.iter().all(|g| g.successful_runs)
    }
}

/// @ai:intent Scalar and per-element statistics of one generator group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatistics {
    pub generator: String,
    pub stop_coverage: u32,
    pub run_count: usize,
    pub total_generation_time: u64,
    pub average_generation_time: f64,
    pub min_generation_time: u64,
    pub max_generation_time: u64,
    pub total_test_suite_size: u64,
    pub average_test_suite_size: f64,
    pub min_test_suite_size: u64,
    pub max_test_suite_size: u64,
    /// `None` (null) when the average generation time is zero
    pub size_over_time: Option<f64>,
    /// `None` (null) when the model has no vertices
    pub vertex_visit_percentage: Option<f64>,
    /// `None` (null) when the model has no edges
    pub edge_visit_percentage: Option<f64>,
    pub total_vertex_visits: BTreeMap<String, u64>,
    pub total_edge_visits: BTreeMap<String, u64>,
    pub average_vertex_visits: BTreeMap<String, f64>,
    pub average_edge_visits: BTreeMap<String, f64>,
}

/// @ai:intent Test execution statistics of one run group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunGroupStatistics {
    pub algorithm: String,
    pub stop_coverage: u32,
    pub run_count: usize,
    pub average_test_duration: f64,
    pub minimum_test_duration: u64,
    pub maximum_test_duration: u64,
    pub successful_runs: bool,
}

/// @ai:intent Serializable statistics for a filtered benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub benchmark: String,
    pub model: ModelInfo,
    pub generators: IndexMap<String, Vec<GroupStatistics>>,
    #[serde(default)]
    pub test_execution: Vec<RunGroupStatistics>,
}

impl StatisticsSummary {
    /// @ai:intent Distinct stop coverage values across all generators, ascending
    /// @ai:effects pure
    pub fn coverage_values(&self) -> Vec<u32> {
        let mut values: Vec<u32> = self
            .generators
            .values()
            .flatten()
            .map(|g| g.stop_coverage)
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}
