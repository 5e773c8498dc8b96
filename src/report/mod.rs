//! @ai:module:intent Report assembly: raw data, HTML and PDF outputs
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportKind, ReportGenerator, JsonReporter, HtmlReporter, ChromePdfRenderer, generate_report

pub mod html_report;
pub mod json_report;
pub mod pdf_report;

pub use html_report::{image_file_name, HtmlReporter, HtmlReporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use pdf_report::{
    cleanup_temp_dir, create_temp_dir, ChromePdfRenderer, CleanupConfirmation, ConfirmWith,
    PdfRendererTrait,
};

use crate::charts::{Chart, ChartCatalog, ChartRenderer, ChartRendererTrait};
use crate::config::{FilterConfig, ReportConfig};
use crate::error::ReportError;
use crate::metrics::{filter_grouped_generators, Benchmark, StatisticsBuilder, StatisticsSummary};
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const BENCHMARKS_FILE: &str = "benchmarks.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const HTML_FILE: &str = "index.html";
pub const PDF_FILE: &str = "report.pdf";
pub const IMAGES_DIR: &str = "images";
pub const TEMP_DIR: &str = "temp";

/// @ai:intent Output form of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    RawData,
    Html,
    Pdf,
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw_data" => Ok(Self::RawData),
            "html" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ReportError::UnknownReportKind(s.to_string())),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RawData => "raw_data",
            Self::Html => "html",
            Self::Pdf => "pdf",
        };
        f.write_str(name)
    }
}

/// @ai:intent Filtered statistics and the charts derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub summary: StatisticsSummary,
    pub charts: Vec<Chart>,
}

/// @ai:intent Combined report generator
pub struct ReportGenerator<C = ChartRenderer, P = ChromePdfRenderer> {
    filter: FilterConfig,
    json: JsonReporter,
    html: HtmlReporter,
    charts: C,
    pdf: P,
}

impl ReportGenerator {
    /// @ai:intent Create a generator with default renderers and no filter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_renderers(ChartRenderer::new(), ChromePdfRenderer::new())
    }

    /// @ai:intent Create a generator from the filter, chart and PDF settings
    /// @ai:effects pure
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::with_renderers(
            ChartRenderer::from_config(&config.charts),
            ChromePdfRenderer::from_config(&config.pdf),
        )
        .with_filter(config.filter.clone())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ChartRendererTrait, P: PdfRendererTrait> ReportGenerator<C, P> {
    /// @ai:intent Create a generator with custom chart and PDF renderers
    /// @ai:effects pure
    pub fn with_renderers(charts: C, pdf: P) -> Self {
        Self {
            filter: FilterConfig::default(),
            json: JsonReporter::new(),
            html: HtmlReporter::new(),
            charts,
            pdf,
        }
    }

    /// @ai:effects pure
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn chart_renderer(&self) -> &C {
        &self.charts
    }

    /// @ai:intent Filter generators, then build statistics and charts from scratch
    /// @ai:effects pure
    pub fn prepare(&self, benchmark: &Benchmark) -> ReportData {
        let grouped = benchmark.generators_grouped();
        let filtered = filter_grouped_generators(&grouped, &self.filter);

        let summary = StatisticsBuilder::build(
            benchmark.name(),
            benchmark.report.model,
            &filtered,
            &benchmark.run_groups,
        );
        let charts = ChartCatalog::build(&summary, &benchmark.run_groups);

        ReportData { summary, charts }
    }

    /// @ai:intent Write the report of the given kind and return every file written
    /// @ai:effects fs:write, io
    pub fn generate(
        &self,
        benchmark: &Benchmark,
        kind: ReportKind,
        output_dir: &Path,
        confirmation: &dyn CleanupConfirmation,
    ) -> Result<Vec<PathBuf>> {
        tracing::info!(
            "Generating {} report for {} in {}",
            kind,
            benchmark.name(),
            output_dir.display()
        );

        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

        let data = self.prepare(benchmark);

        let written = match kind {
            ReportKind::RawData => self.write_raw_data(benchmark, &data, output_dir)?,
            ReportKind::Html => self.write_html(&data, output_dir)?,
            ReportKind::Pdf => self.write_pdf(&data, output_dir, confirmation)?,
        };

        tracing::info!("Report generated in {} ({} files)", output_dir.display(), written.len());
        Ok(written)
    }

    /// @ai:effects fs:write
    fn write_raw_data(
        &self,
        benchmark: &Benchmark,
        data: &ReportData,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let benchmarks_path = output_dir.join(BENCHMARKS_FILE);
        self.json.write_benchmark(&benchmark.report, &benchmarks_path)?;

        let statistics_path = output_dir.join(STATISTICS_FILE);
        self.json.write_statistics(&data.summary, &statistics_path)?;

        let mut written = vec![benchmarks_path, statistics_path];
        written.extend(self.render_images(&data.charts, output_dir)?);
        Ok(written)
    }

    /// @ai:effects fs:write
    fn write_html(&self, data: &ReportData, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = self.render_images(&data.charts, output_dir)?;

        let html_path = output_dir.join(HTML_FILE);
        self.html
            .generate(&data.summary, &data.charts, chrono::Local::now(), &html_path)?;

        written.push(html_path);
        Ok(written)
    }

    /// @ai:effects fs:write, io
    fn write_pdf(
        &self,
        data: &ReportData,
        output_dir: &Path,
        confirmation: &dyn CleanupConfirmation,
    ) -> Result<Vec<PathBuf>> {
        let temp_dir = output_dir.join(TEMP_DIR);
        create_temp_dir(&temp_dir)?;

        let mut written = self.write_html(data, &temp_dir)?;

        let pdf_path = output_dir.join(PDF_FILE);
        self.pdf.render(&temp_dir.join(HTML_FILE), &pdf_path)?;

        if cleanup_temp_dir(&temp_dir, confirmation)? {
            written.clear();
        }

        written.push(pdf_path);
        Ok(written)
    }

    /// @ai:intent Render every chart into `<dir>/images`
    /// @ai:effects fs:write
    fn render_images(&self, charts: &[Chart], dir: &Path) -> Result<Vec<PathBuf>> {
        let images_dir = dir.join(IMAGES_DIR);
        std::fs::create_dir_all(&images_dir)
            .with_context(|| format!("Failed to create {}", images_dir.display()))?;

        let mut written = Vec::with_capacity(charts.len());

        for chart in charts {
            let path = images_dir.join(image_file_name(&chart.name));
            self.charts.render(chart, &path)?;
            written.push(path);
        }

        tracing::info!("Rendered {} charts", written.len());
        Ok(written)
    }
}

/// @ai:intent Parse the report kind, then generate; unknown kinds fail before any file is written
/// @ai:effects fs:write, io
pub fn generate_report<C: ChartRendererTrait, P: PdfRendererTrait>(
    generator: &ReportGenerator<C, P>,
    benchmark: &Benchmark,
    kind: &str,
    output_dir: &Path,
    confirmation: &dyn CleanupConfirmation,
) -> Result<Vec<PathBuf>> {
    let kind: ReportKind = kind.parse()?;
    generator.generate(benchmark, kind, output_dir, confirmation)
}
