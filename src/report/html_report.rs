//! @ai:module:intent Static HTML report with statistics tables and chart images
//! @ai:module:layer infrastructure
//! @ai:module:public_api HtmlReporter, HtmlReporterTrait, image_file_name, image_src
//! @ai:module:stateless true

use crate::charts::Chart;
use crate::error::Result;
use crate::metrics::{GroupStatistics, RunGroupStatistics, StatisticsSummary};
use crate::report::IMAGES_DIR;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::Path;
use url::Url;

const IMAGE_BASE: &str = "file:///";

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-bottom: 1.5em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }
th { background: #f0f0f0; }
figure { margin: 2em 0; page-break-inside: avoid; }
img { max-width: 100%; }";

const GROUP_COLUMNS: [&str; 14] = [
    "Coverage (%)",
    "Runs",
    "Total Time (μs)",
    "Average Time (μs)",
    "Min Time (μs)",
    "Max Time (μs)",
    "Total Size",
    "Average Size",
    "Min Size",
    "Max Size",
    "Size/Time",
    "Vertex Visits (%)",
    "Edge Visits (%)",
    "Unique Vertices",
];

const TEST_COLUMNS: [&str; 7] = [
    "Generator",
    "Coverage (%)",
    "Runs",
    "Average Duration (μs)",
    "Min Duration (μs)",
    "Max Duration (μs)",
    "Successful",
];

/// @ai:intent Trait for HTML report generation
pub trait HtmlReporterTrait: Send + Sync {
    /// @ai:intent Write the HTML document referencing chart images under `images/`
    fn generate(
        &self,
        summary: &StatisticsSummary,
        charts: &[Chart],
        generated_at: DateTime<Local>,
        output_path: &Path,
    ) -> Result<()>;
}

/// @ai:intent Generates the HTML report document
pub struct HtmlReporter;

impl HtmlReporter {
    /// @ai:intent Create a new HTML reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Build the complete HTML document
    /// @ai:effects pure
    pub fn render(summary: &StatisticsSummary, charts: &[Chart], generated_at: DateTime<Local>) -> String {
        let title = escape_html(&format!("GraphWalker Benchmark Report: {}", summary.benchmark));
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n"));
        html.push_str(&format!("<h1>{title}</h1>\n"));
        html.push_str(&format!(
            "<p class=\"generated\">Generated at {}</p>\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        html.push_str(&Self::model_section(summary));
        html.push_str(&Self::statistics_section(summary));

        if !summary.test_execution.is_empty() {
            html.push_str(&Self::test_execution_section(&summary.test_execution));
        }

        html.push_str(&Self::charts_section(charts));
        html.push_str("</body>\n</html>\n");
        html
    }

    fn model_section(summary: &StatisticsSummary) -> String {
        format!(
            "<h2>Model</h2>\n<table>\n<tr><th>Vertices</th><td>{}</td></tr>\n<tr><th>Edges</th><td>{}</td></tr>\n</table>\n",
            summary.model.vertices, summary.model.edges
        )
    }

    fn statistics_section(summary: &StatisticsSummary) -> String {
        let mut html = String::from("<h2>Statistics</h2>\n");

        for (generator, groups) in &summary.generators {
            html.push_str(&format!("<h3>{}</h3>\n<table>\n", escape_html(generator)));
            html.push_str(&header_row(&GROUP_COLUMNS));

            for group in groups {
                html.push_str(&group_row(group));
            }

            html.push_str("</table>\n");

            for group in groups {
                html.push_str(&visit_details(group));
            }
        }

        html
    }

    fn test_execution_section(groups: &[RunGroupStatistics]) -> String {
        let mut html = String::from("<h2>Test Execution</h2>\n<table>\n");
        html.push_str(&header_row(&TEST_COLUMNS));

        for group in groups {
            let cells = [
                escape_html(&group.algorithm),
                group.stop_coverage.to_string(),
                group.run_count.to_string(),
                format!("{:.2}", group.average_test_duration),
                group.minimum_test_duration.to_string(),
                group.maximum_test_duration.to_string(),
                if group.successful_runs { "yes" } else { "no" }.to_string(),
            ];
            html.push_str(&data_row(&cells));
        }

        html.push_str("</table>\n");
        html
    }

    fn charts_section(charts: &[Chart]) -> String {
        let mut html = String::from("<h2>Charts</h2>\n");

        for chart in charts {
            html.push_str(&format!(
                "<figure>\n<img src=\"{}\" alt=\"{}\">\n<figcaption>{}</figcaption>\n</figure>\n",
                image_src(&chart.name),
                escape_html(&chart.name),
                escape_html(&chart.title)
            ));
        }

        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlReporterTrait for HtmlReporter {
    /// @ai:effects fs:write
    fn generate(
        &self,
        summary: &StatisticsSummary,
        charts: &[Chart],
        generated_at: DateTime<Local>,
        output_path: &Path,
    ) -> Result<()> {
        std::fs::write(output_path, Self::render(summary, charts, generated_at))?;
        tracing::debug!("Wrote {}", output_path.display());
        Ok(())
    }
}

/// @ai:intent File name of a rendered chart image
/// @ai:effects pure
pub fn image_file_name(chart_name: &str) -> String {
    format!("{chart_name}.png")
}

fn header_row(columns: &[&str]) -> String {
    let cells: String = columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c)))
        .collect();
    format!("<tr>{cells}</tr>\n")
}

fn data_row(cells: &[String]) -> String {
    let cells: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!("<tr>{cells}</tr>\n")
}

fn group_row(group: &GroupStatistics) -> String {
    let visited = group.total_vertex_visits.values().filter(|v| **v > 0).count();

    let cells = [
        group.stop_coverage.to_string(),
        group.run_count.to_string(),
        group.total_generation_time.to_string(),
        format!("{:.2}", group.average_generation_time),
        group.min_generation_time.to_string(),
        group.max_generation_time.to_string(),
        group.total_test_suite_size.to_string(),
        format!("{:.2}", group.average_test_suite_size),
        group.min_test_suite_size.to_string(),
        group.max_test_suite_size.to_string(),
        format_optional(group.size_over_time, 4),
        format_optional(group.vertex_visit_percentage, 2),
        format_optional(group.edge_visit_percentage, 2),
        visited.to_string(),
    ];

    data_row(&cells)
}

/// Per-element visit tables of one group, collapsed by default.
fn visit_details(group: &GroupStatistics) -> String {
    let mut html = format!(
        "<details>\n<summary>Visits at {}% coverage</summary>\n",
        group.stop_coverage
    );

    html.push_str(&visit_table(
        "Vertex",
        &group.total_vertex_visits,
        &group.average_vertex_visits,
    ));
    html.push_str(&visit_table(
        "Edge",
        &group.total_edge_visits,
        &group.average_edge_visits,
    ));

    html.push_str("</details>\n");
    html
}

fn visit_table(element: &str, totals: &BTreeMap<String, u64>, averages: &BTreeMap<String, f64>) -> String {
    if totals.is_empty() {
        return String::new();
    }

    let mut html = String::from("<table>\n");
    html.push_str(&header_row(&[element, "Total Visits", "Average Visits"]));

    for (id, total) in totals {
        let cells = [
            escape_html(id),
            total.to_string(),
            format_optional(averages.get(id).copied(), 2),
        ];
        html.push_str(&data_row(&cells));
    }

    html.push_str("</table>\n");
    html
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "n/a".to_string(),
    }
}

/// @ai:intent Escape text for HTML content and attribute values
/// @ai:effects pure
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// @ai:intent Relative, percent-encoded `src` of a chart image
/// @ai:effects pure
pub fn image_src(chart_name: &str) -> String {
    let file = image_file_name(chart_name);

    let encoded = Url::parse(IMAGE_BASE).ok().and_then(|mut url| {
        url.path_segments_mut().ok()?.push(IMAGES_DIR).push(&file);
        Some(url.path().trim_start_matches('/').to_string())
    });

    encoded.unwrap_or_else(|| format!("{IMAGES_DIR}/{file}"))
}
