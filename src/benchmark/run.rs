//! @ai:module:intent Single benchmark run loaded from its JSON artifacts
//! @ai:module:layer domain
//! @ai:module:public_api RunRecord, RunReport, PathStep, ModelInfo, TestResults
//! @ai:module:stateless true

use crate::error::{ReportError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File names making up one run directory
pub const PATH_FILE: &str = "path.json";
pub const REPORT_FILE: &str = "report.json";
pub const TEST_RESULTS_FILE: &str = "test_results.json";

/// @ai:intent Test id to execution duration in microseconds, `None` when the test did not complete
pub type TestResults = BTreeMap<String, Option<u64>>;

/// @ai:intent One step of a generated traversal path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// @ai:intent Vertex and edge counts of the traversed model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub vertices: u64,
    pub edges: u64,
}

/// @ai:intent Summary metadata written by the generator for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub generator: String,
    /// Target coverage in percent the run was configured to stop at
    pub stop_coverage: u32,
    /// Microseconds spent generating the path
    pub generation_time: u64,
    /// Coverage actually reached
    #[serde(default)]
    pub coverage: f64,
    pub model: ModelInfo,
    #[serde(default)]
    pub vertex_visits: BTreeMap<String, u64>,
    #[serde(default)]
    pub edge_visits: BTreeMap<String, u64>,
}

/// @ai:intent One execution of a generator against a model
/// @ai:invariant immutable after load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub path: Vec<PathStep>,
    pub report: RunReport,
    #[serde(default)]
    pub test_results: TestResults,
}

impl RunRecord {
    /// @ai:intent Build a run from already parsed parts
    /// @ai:effects pure
    pub fn new(path: Vec<PathStep>, report: RunReport, test_results: TestResults) -> Self {
        Self {
            path,
            report,
            test_results,
        }
    }

    /// @ai:intent Load a run from its path, report and optional test results files
    /// @ai:pre path_file and report_file exist and hold valid JSON
    /// @ai:effects fs:read
    pub fn from_files(path_file: &Path, report_file: &Path, test_results_file: &Path) -> Result<Self> {
        let path = read_json(path_file)?;
        let report = read_json(report_file)?;

        let test_results = if test_results_file.exists() {
            read_json(test_results_file)?
        } else {
            TestResults::new()
        };

        Ok(Self::new(path, report, test_results))
    }

    /// @ai:intent Load a run from a directory using the standard file names
    /// @ai:effects fs:read
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Self::from_files(
            &dir.join(PATH_FILE),
            &dir.join(REPORT_FILE),
            &dir.join(TEST_RESULTS_FILE),
        )
    }

    /// @ai:intent Number of elements in the generated test suite
    /// @ai:effects pure
    pub fn test_suite_size(&self) -> u64 {
        self.path.len() as u64
    }

    /// @ai:intent Whether test execution results were recorded for this run
    /// @ai:effects pure
    pub fn has_test_results(&self) -> bool {
        !self.test_results.is_empty()
    }

    /// @ai:intent Whether the generated suite ran to completion
    /// @ai:effects pure
    pub fn tests_completed(&self) -> bool {
        self.has_test_results() && self.test_results.values().all(Option::is_some)
    }

    /// @ai:intent Summed duration of the completed tests in microseconds
    /// @ai:effects pure
    pub fn test_suite_duration(&self) -> u64 {
        self.test_results.values().flatten().sum()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
