//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::{BenchmarkReport, StatisticsSummary};
use serde::Serialize;
use std::path::Path;

/// @ai:intent Trait for writing the raw data JSON files
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write the full grouped benchmark report
    fn write_benchmark(&self, report: &BenchmarkReport, output_path: &Path) -> Result<()>;

    /// @ai:intent Write the computed statistics
    fn write_statistics(&self, summary: &StatisticsSummary, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes pretty-printed JSON files
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:effects fs:write
    fn write_pretty<T: Serialize>(value: &T, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(output_path, json)?;
        tracing::debug!("Wrote {}", output_path.display());
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects fs:write
    fn write_benchmark(&self, report: &BenchmarkReport, output_path: &Path) -> Result<()> {
        Self::write_pretty(report, output_path)
    }

    /// @ai:effects fs:write
    fn write_statistics(&self, summary: &StatisticsSummary, output_path: &Path) -> Result<()> {
        Self::write_pretty(summary, output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::ModelInfo;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_write_statistics_round_trips() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("statistics.json");

        let summary = StatisticsSummary {
            benchmark: "shop-model".to_string(),
            model: ModelInfo { vertices: 3, edges: 5 },
            generators: IndexMap::new(),
            test_execution: vec![],
        };

        reporter.write_statistics(&summary, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"benchmark\": \"shop-model\""));

        let parsed: StatisticsSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_write_benchmark_keeps_generator_order() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("benchmarks.json");

        let mut generators = IndexMap::new();
        generators.insert("Weighted".to_string(), vec![]);
        generators.insert("Random".to_string(), vec![]);

        let report = BenchmarkReport {
            name: "shop-model".to_string(),
            model: ModelInfo { vertices: 3, edges: 5 },
            generators,
        };

        reporter.write_benchmark(&report, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let weighted = content.find("Weighted").unwrap();
        let random = content.find("Random").unwrap();
        assert!(weighted < random);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("missing").join("statistics.json");

        let summary = StatisticsSummary {
            benchmark: "b".to_string(),
            model: ModelInfo::default(),
            generators: IndexMap::new(),
            test_execution: vec![],
        };

        assert!(reporter.write_statistics(&summary, &output).is_err());
    }
}
