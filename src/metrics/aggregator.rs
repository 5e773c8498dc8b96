//! @ai:module:intent Group raw runs into generator groups and run groups
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkAggregator, BenchmarkAggregatorTrait
//! @ai:module:stateless true

use crate::benchmark::{ModelInfo, RunRecord};
use crate::metrics::types::{Benchmark, BenchmarkReport};
use crate::metrics::{GeneratorGroup, RunGroup};
use indexmap::IndexMap;

/// @ai:intent Trait for benchmark aggregation
pub trait BenchmarkAggregatorTrait: Send + Sync {
    /// @ai:intent Aggregate loaded runs into a benchmark
    fn aggregate(&self, name: String, runs: Vec<RunRecord>) -> Benchmark;
}

/// @ai:intent Buckets runs by (generator, stop coverage)
pub struct BenchmarkAggregator;

impl BenchmarkAggregator {
    /// @ai:intent Create a new benchmark aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Take the model from the first run and flag runs that disagree
    /// @ai:effects pure
    fn resolve_model(runs: &[RunRecord]) -> ModelInfo {
        let Some(first) = runs.first() else {
            return ModelInfo::default();
        };

        let model = first.report.model;

        for run in runs.iter().filter(|r| r.report.model != model) {
            tracing::warn!(
                "Run of {} at {}% reports model {:?}, expected {:?}",
                run.report.generator,
                run.report.stop_coverage,
                run.report.model,
                model
            );
        }

        model
    }

    /// @ai:intent Group runs by generator name, then by stop coverage
    /// @ai:effects pure
    fn group_generators(runs: Vec<RunRecord>) -> IndexMap<String, Vec<GeneratorGroup>> {
        let mut grouped: IndexMap<String, Vec<GeneratorGroup>> = IndexMap::new();

        for run in runs {
            let groups = grouped.entry(run.report.generator.clone()).or_default();
            let coverage = run.report.stop_coverage;

            match groups.iter_mut().find(|g| g.stop_coverage == coverage) {
                Some(group) => group.push(run),
                None => {
                    let mut group = GeneratorGroup::new(run.report.generator.clone(), coverage);
                    group.push(run);
                    groups.push(group);
                }
            }
        }

        for groups in grouped.values_mut() {
            groups.sort_by_key(|g| g.stop_coverage);
        }

        grouped
    }

    /// @ai:intent Derive run groups from generator groups, sorted by coverage
    /// @ai:effects pure
    fn build_run_groups(generators: &IndexMap<String, Vec<GeneratorGroup>>) -> Vec<RunGroup> {
        let mut run_groups: Vec<RunGroup> = generators
            .values()
            .flatten()
            .filter_map(|g| RunGroup::from_runs(&g.generator, g.stop_coverage, &g.runs))
            .collect();

        // stable: generators keep their order within one coverage value
        run_groups.sort_by_key(|g| g.stop_coverage);
        run_groups
    }
}

impl Default for BenchmarkAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkAggregatorTrait for BenchmarkAggregator {
    /// @ai:intent Aggregate runs into generator groups and run groups
    /// @ai:effects pure
    fn aggregate(&self, name: String, runs: Vec<RunRecord>) -> Benchmark {
        let model = Self::resolve_model(&runs);
        let generators = Self::group_generators(runs);
        let run_groups = Self::build_run_groups(&generators);

        tracing::info!(
            "Aggregated benchmark {}: {} generators, {} run groups",
            name,
            generators.len(),
            run_groups.len()
        );

        Benchmark {
            report: BenchmarkReport {
                name,
                model,
                generators,
            },
            run_groups,
        }
    }
}
