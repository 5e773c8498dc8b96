//! @ai:module:intent Benchmark run definitions and loading
//! @ai:module:layer domain
//! @ai:module:public_api RunRecord, RunReport, PathStep, ModelInfo, BenchmarkLoader, load_benchmark

pub mod loader;
pub mod run;

pub use loader::{BenchmarkLoader, BenchmarkLoaderTrait};
pub use run::{ModelInfo, PathStep, RunRecord, RunReport, TestResults};

use crate::metrics::{Benchmark, BenchmarkAggregator, BenchmarkAggregatorTrait};
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Load and aggregate the benchmark stored in a directory
/// @ai:effects fs:read
pub fn load_benchmark(benchmark_dir: &Path) -> Result<Benchmark> {
    let runs = BenchmarkLoader::new()
        .load_runs(benchmark_dir)
        .with_context(|| format!("Failed to load benchmark: {}", benchmark_dir.display()))?;

    let name = BenchmarkLoader::benchmark_name(benchmark_dir);
    Ok(BenchmarkAggregator::new().aggregate(name, runs))
}
