//! @ai:module:intent Configuration structs for report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportConfig, ReportSettings, FilterConfig, ChartConfig, PdfConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the report tool
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub charts: ChartConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
}

/// @ai:intent Which report to produce and where
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// One of `raw_data`, `html` or `pdf`
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// @ai:intent Generator name whitelist/blacklist applied before statistics and charts
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub whitelist: Option<Vec<String>>,
    pub blacklist: Option<Vec<String>>,
}

/// @ai:intent Raster size of rendered charts
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

/// @ai:intent Headless browser settings for PDF reports
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Chromium/Chrome binary, discovered on the system when unset
    pub browser: Option<PathBuf>,
    /// Pre-answer the temporary directory prompt
    pub delete_temp: Option<bool>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_kind() -> String {
    "html".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("report")
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}

impl ReportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl FilterConfig {
    /// @ai:intent Build a filter from optional name lists
    /// @ai:effects pure
    pub fn new(whitelist: Option<Vec<String>>, blacklist: Option<Vec<String>>) -> Self {
        Self {
            whitelist,
            blacklist,
        }
    }

    /// @ai:intent Check if a generator name survives the whitelist, then the blacklist
    /// @ai:effects pure
    pub fn retains(&self, generator: &str) -> bool {
        let whitelisted = self
            .whitelist
            .as_ref()
            .filter(|names| !names.is_empty())
            .map(|names| names.iter().any(|name| name == generator))
            .unwrap_or(true);

        let blacklisted = self
            .blacklist
            .as_ref()
            .map(|names| names.iter().any(|name| name == generator))
            .unwrap_or(false);

        whitelisted && !blacklisted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_filter_retains_all_when_empty() {
        let filter = FilterConfig::default();
        assert!(filter.retains("RandomPath"));

        let filter = FilterConfig::new(names(&[]), names(&[]));
        assert!(filter.retains("RandomPath"));
    }

    #[test]
    fn test_filter_whitelist() {
        let filter = FilterConfig::new(names(&["Random"]), None);
        assert!(filter.retains("Random"));
        assert!(!filter.retains("Weighted"));
    }

    #[test]
    fn test_filter_blacklist_after_whitelist() {
        let filter = FilterConfig::new(names(&["A", "B"]), names(&["B"]));
        assert!(filter.retains("A"));
        assert!(!filter.retains("B"));
        assert!(!filter.retains("C"));
    }

    #[test]
    fn test_config_defaults_from_empty_toml() {
        let config: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(config.report.kind, "html");
        assert_eq!(config.charts.width, 1280);
        assert_eq!(config.charts.height, 960);
        assert!(config.pdf.browser.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.toml");

        let mut config = ReportConfig::default();
        config.report.kind = "pdf".to_string();
        config.filter.blacklist = names(&["Slow"]);
        config.save(&path).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded.report.kind, "pdf");
        assert_eq!(loaded.filter, config.filter);
    }
}
