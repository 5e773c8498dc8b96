//! @ai:module:intent Build the serializable statistics summary from filtered generator groups
//! @ai:module:layer application
//! @ai:module:public_api StatisticsBuilder
//! @ai:module:stateless true

use crate::benchmark::ModelInfo;
use crate::metrics::types::{GroupStatistics, GroupedGenerators, RunGroupStatistics, StatisticsSummary};
use crate::metrics::{GeneratorGroup, RunGroup};

/// @ai:intent Computes per-group scalar and per-element statistics
pub struct StatisticsBuilder;

impl StatisticsBuilder {
    /// @ai:intent Build statistics for the filtered generators and their run groups
    /// @ai:effects pure
    pub fn build(
        benchmark_name: &str,
        model: ModelInfo,
        grouped: &GroupedGenerators<'_>,
        run_groups: &[RunGroup],
    ) -> StatisticsSummary {
        let generators = grouped
            .iter()
            .map(|(name, groups)| {
                let stats = groups.iter().map(|g| Self::group_statistics(g, model)).collect();
                (name.to_string(), stats)
            })
            .collect();

        let test_execution = run_groups
            .iter()
            .filter(|g| grouped.contains_key(g.algorithm.as_str()))
            .map(Self::run_group_statistics)
            .collect();

        StatisticsSummary {
            benchmark: benchmark_name.to_string(),
            model,
            generators,
            test_execution,
        }
    }

    /// @ai:intent Statistics of one generator group
    /// @ai:effects pure
    pub fn group_statistics(group: &GeneratorGroup, model: ModelInfo) -> GroupStatistics {
        GroupStatistics {
            generator: group.generator.clone(),
            stop_coverage: group.stop_coverage,
            run_count: group.run_count(),
            total_generation_time: group.total_generation_time(),
            average_generation_time: group.average_generation_time(),
            min_generation_time: group.min_generation_time(),
            max_generation_time: group.max_generation_time(),
            total_test_suite_size: group.total_test_suite_size(),
            average_test_suite_size: group.average_test_suite_size(),
            min_test_suite_size: group.min_test_suite_size(),
            max_test_suite_size: group.max_test_suite_size(),
            size_over_time: group.size_over_time(),
            vertex_visit_percentage: group.vertex_visit_percentage(model.vertices),
            edge_visit_percentage: group.edge_visit_percentage(model.edges),
            total_vertex_visits: group.total_vertex_visits(),
            total_edge_visits: group.total_edge_visits(),
            average_vertex_visits: group.average_vertex_visits(),
            average_edge_visits: group.average_edge_visits(),
        }
    }

    fn run_group_statistics(group: &RunGroup) -> RunGroupStatistics {
        RunGroupStatistics {
            algorithm: group.algorithm.clone(),
            stop_coverage: group.stop_coverage,
            run_count: group.test_durations.len(),
            average_test_duration: group.average_test_duration(),
            minimum_test_duration: group.minimum_test_duration(),
            maximum_test_duration: group.maximum_test_duration(),
            successful_runs: group.successful_runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{RunRecord, RunReport, TestResults};
    use crate::config::FilterConfig;
    use crate::metrics::{filter_grouped_generators, BenchmarkAggregator, BenchmarkAggregatorTrait};
    use std::collections::BTreeMap;

    fn run(generator: &str, coverage: u32, time: u64, tests: &[(&str, Option<u64>)]) -> RunRecord {
        RunRecord::new(
            vec![],
            RunReport {
                generator: generator.to_string(),
                stop_coverage: coverage,
                generation_time: time,
                coverage: coverage as f64,
                model: ModelInfo { vertices: 0, edges: 2 },
                vertex_visits: BTreeMap::new(),
                edge_visits: [("e0".to_string(), 1)].into_iter().collect(),
            },
            tests
                .iter()
                .map(|(id, d)| (id.to_string(), *d))
                .collect::<TestResults>(),
        )
    }

    #[test]
    fn test_statistics_keyed_by_generator_and_coverage() {
        let benchmark = BenchmarkAggregator::new().aggregate(
            "bench".to_string(),
            vec![
                run("Random", 50, 10, &[]),
                run("Random", 50, 20, &[]),
                run("Random", 100, 0, &[]),
            ],
        );
        let grouped = benchmark.generators_grouped();
        let summary = StatisticsBuilder::build("bench", benchmark.report.model, &grouped, &[]);

        let random = &summary.generators["Random"];
        assert_eq!(random.len(), 2);
        assert_eq!(random[0].stop_coverage, 50);
        assert_eq!(random[0].total_generation_time, 30);
        assert!((random[0].average_generation_time - 15.0).abs() < 1e-9);
        assert_eq!(random[0].edge_visit_percentage, Some(50.0));
        assert_eq!(random[0].vertex_visit_percentage, None);
        assert_eq!(random[1].size_over_time, None);
    }

    #[test]
    fn test_test_execution_follows_filter() {
        let benchmark = BenchmarkAggregator::new().aggregate(
            "bench".to_string(),
            vec![
                run("Random", 50, 10, &[("t", Some(7))]),
                run("Weighted", 50, 10, &[("t", Some(9))]),
            ],
        );
        let grouped = benchmark.generators_grouped();
        let filter = FilterConfig::new(None, Some(vec!["Weighted".to_string()]));
        let filtered = filter_grouped_generators(&grouped, &filter);

        let summary =
            StatisticsBuilder::build("bench", benchmark.report.model, &filtered, &benchmark.run_groups);

        assert_eq!(summary.test_execution.len(), 1);
        assert_eq!(summary.test_execution[0].algorithm, "Random");
        assert_eq!(summary.test_execution[0].maximum_test_duration, 7);
    }

    #[test]
    fn test_sentinels_serialize_as_null() {
        let benchmark =
            BenchmarkAggregator::new().aggregate("bench".to_string(), vec![run("Random", 50, 0, &[])]);
        let grouped = benchmark.generators_grouped();
        let summary = StatisticsBuilder::build("bench", benchmark.report.model, &grouped, &[]);

        let json = serde_json::to_value(&summary).unwrap();
        let stats = &json["generators"]["Random"][0];
        assert!(stats["sizeOverTime"].is_null());
        assert!(stats["vertexVisitPercentage"].is_null());
        assert_eq!(stats["stopCoverage"], 50);
    }
}
