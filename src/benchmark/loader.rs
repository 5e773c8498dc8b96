//! @ai:module:intent Discover and load benchmark runs from a directory tree
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkLoader, BenchmarkLoaderTrait
//! @ai:module:stateless true

use crate::benchmark::run::{RunRecord, REPORT_FILE};
use crate::error::{ReportError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading the runs of a benchmark
pub trait BenchmarkLoaderTrait: Send + Sync {
    /// @ai:intent Load every run found below the benchmark directory
    fn load_runs(&self, benchmark_dir: &Path) -> Result<Vec<RunRecord>>;
}

/// @ai:intent Loads runs from directories holding path.json and report.json
/// @ai:effects pure (stateless)
pub struct BenchmarkLoader;

impl BenchmarkLoader {
    /// @ai:intent Create a new benchmark loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Name a benchmark after its directory
    /// @ai:effects pure
    pub fn benchmark_name(benchmark_dir: &Path) -> String {
        benchmark_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| benchmark_dir.display().to_string())
    }

    /// @ai:intent Find all run directories, in file name order
    /// @ai:effects fs:read
    fn find_run_dirs(benchmark_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        for entry in WalkDir::new(benchmark_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| ReportError::walk(benchmark_dir, e))?;

            if entry.file_type().is_file() && entry.file_name() == REPORT_FILE {
                if let Some(parent) = entry.path().parent() {
                    dirs.push(parent.to_path_buf());
                }
            }
        }

        Ok(dirs)
    }
}

impl Default for BenchmarkLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkLoaderTrait for BenchmarkLoader {
    /// @ai:intent Load all runs; a report without its path file aborts the load
    /// @ai:effects fs:read
    fn load_runs(&self, benchmark_dir: &Path) -> Result<Vec<RunRecord>> {
        let run_dirs = Self::find_run_dirs(benchmark_dir)?;
        let mut runs = Vec::with_capacity(run_dirs.len());

        for dir in run_dirs {
            tracing::debug!("Loading run from {}", dir.display());
            runs.push(RunRecord::from_dir(&dir)?);
        }

        if runs.is_empty() {
            return Err(ReportError::NoRuns(benchmark_dir.to_path_buf()));
        }

        tracing::info!("Loaded {} runs from {}", runs.len(), benchmark_dir.display());
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::run::{PATH_FILE, TEST_RESULTS_FILE};
    use tempfile::TempDir;

    fn create_run(dir: &Path, generator: &str, coverage: u32, with_path: bool) {
        std::fs::create_dir_all(dir).unwrap();
        let report = format!(
            r#"{{"generator": "{generator}", "stopCoverage": {coverage}, "generationTime": 10,
                "model": {{"vertices": 2, "edges": 2}}}}"#
        );
        std::fs::write(dir.join(REPORT_FILE), report).unwrap();

        if with_path {
            std::fs::write(dir.join(PATH_FILE), r#"[{"id": "v0"}]"#).unwrap();
        }
    }

    #[test]
    fn test_load_nested_runs_in_order() {
        let temp = TempDir::new().unwrap();
        create_run(&temp.path().join("b/run-1"), "B", 50, true);
        create_run(&temp.path().join("a/run-2"), "A", 100, true);
        create_run(&temp.path().join("a/run-1"), "A", 50, true);
        std::fs::write(temp.path().join("a/run-1").join(TEST_RESULTS_FILE), r#"{"t": 5}"#).unwrap();

        let runs = BenchmarkLoader::new().load_runs(temp.path()).unwrap();
        let keys: Vec<_> = runs
            .iter()
            .map(|r| (r.report.generator.as_str(), r.report.stop_coverage))
            .collect();

        assert_eq!(keys, vec![("A", 50), ("A", 100), ("B", 50)]);
        assert!(runs[0].has_test_results());
        assert!(!runs[1].has_test_results());
    }

    #[test]
    fn test_missing_path_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        create_run(&temp.path().join("run"), "A", 50, false);

        let err = BenchmarkLoader::new().load_runs(temp.path()).unwrap_err();
        match err {
            ReportError::FileRead { path, .. } => assert!(path.ends_with(PATH_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_benchmark_dir_reports_walk_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = BenchmarkLoader::new().load_runs(&missing).unwrap_err();
        match err {
            ReportError::Walk { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_directory_has_no_runs() {
        let temp = TempDir::new().unwrap();
        let err = BenchmarkLoader::new().load_runs(temp.path()).unwrap_err();
        assert!(matches!(err, ReportError::NoRuns(_)));
    }

    #[test]
    fn test_benchmark_name() {
        assert_eq!(BenchmarkLoader::benchmark_name(Path::new("/data/bench-2024")), "bench-2024");
    }
}
