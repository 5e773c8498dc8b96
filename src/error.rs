//! @ai:module:intent Define error types for benchmark loading and report generation
//! @ai:module:layer domain
//! @ai:module:public_api ReportError, Result
//! @ai:module:stateless true

use std::path::{Path, PathBuf};
use thiserror::Error;

/// @ai:intent Unified error type for loading benchmarks and writing reports
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown report type \"{0}\" (expected raw_data, html or pdf)")]
    UnknownReportKind(String),

    #[error("Temporary directory {0} already exists, remove it before retrying")]
    TempDirExists(PathBuf),

    #[error("No benchmark runs found under {0}")]
    NoRuns(PathBuf),

    #[error("Failed to render chart \"{name}\": {message}")]
    Chart { name: String, message: String },

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

impl ReportError {
    /// @ai:intent Wrap a directory walk failure with the entry it failed on
    pub fn walk(root: &Path, source: walkdir::Error) -> Self {
        let path = source.path().unwrap_or(root).to_path_buf();
        Self::Walk { path, source }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_report_kind_message() {
        let err = ReportError::UnknownReportKind("xml".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown report type \"xml\" (expected raw_data, html or pdf)"
        );
    }

    #[test]
    fn test_file_read_names_path() {
        let err = ReportError::FileRead {
            path: PathBuf::from("runs/a/report.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("runs/a/report.json"));
    }
}
