//! @ai:module:intent Aggregation, filtering and statistics for benchmark runs
//! @ai:module:layer application
//! @ai:module:public_api Benchmark, GeneratorGroup, RunGroup, BenchmarkAggregator, StatisticsBuilder, StatisticsSummary

pub mod aggregator;
pub mod filter;
pub mod generator_group;
pub mod run_group;
pub mod statistics;
pub mod types;

pub use aggregator::{BenchmarkAggregator, BenchmarkAggregatorTrait};
pub use filter::filter_grouped_generators;
pub use generator_group::GeneratorGroup;
pub use run_group::RunGroup;
pub use statistics::StatisticsBuilder;
pub use types::{
    Benchmark, BenchmarkReport, GroupStatistics, GroupedGenerators, RunGroupStatistics,
    StatisticsSummary,
};
