//! @ai:module:intent GraphWalker benchmark report library
//! @ai:module:layer application
//! @ai:module:public_api benchmark, metrics, charts, report, config, error

pub mod benchmark;
pub mod charts;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;

pub use benchmark::{load_benchmark, BenchmarkLoader, RunRecord};
pub use charts::{Chart, ChartCatalog, ChartRenderer, ChartRendererTrait};
pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use metrics::{Benchmark, BenchmarkAggregator, StatisticsBuilder, StatisticsSummary};
pub use report::{generate_report, ReportGenerator, ReportKind};
