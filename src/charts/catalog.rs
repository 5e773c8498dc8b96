//! @ai:module:intent Fixed chart catalog turning statistics into plottable series
//! @ai:module:layer application
//! @ai:module:public_api Chart, Plot, Series, HistogramSeries, ChartCatalog, GENERAL_CHARTS, TEST_EXECUTION_CHARTS, HISTOGRAM_CHARTS
//! @ai:module:stateless true

use crate::charts::trend::trend_line;
use crate::metrics::{GroupStatistics, RunGroup, StatisticsSummary};
use indexmap::IndexMap;

/// Total bar width shared by all generators at one coverage value
const BAR_SPAN: f64 = 6.0;

const COVERAGE_LABEL: &str = "Coverage (%)";

/// @ai:intent One plotted series with its optional trend line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub trend: Vec<(f64, f64)>,
}

/// @ai:intent Visit counts of one generator, most visited first
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub label: String,
    pub bins: Vec<(String, u64)>,
}

/// @ai:intent Plot layout and data of a chart
#[derive(Debug, Clone, PartialEq)]
pub enum Plot {
    Bars {
        series: Vec<Series>,
        bar_width: f64,
        x_ticks: Vec<u32>,
    },
    Lines {
        series: Vec<Series>,
        x_ticks: Vec<u32>,
    },
    Histogram {
        series: Vec<HistogramSeries>,
    },
}

/// @ai:intent A fully computed chart ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Output key, also the image file stem
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub plot: Plot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStyle {
    Bars,
    Lines,
}

/// @ai:intent Chart plotted with one point per generator group
pub struct ChartDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub style: PlotStyle,
    pub value: fn(&GroupStatistics) -> Option<f64>,
}

/// @ai:intent Chart plotted with one point per run group
pub struct TestChartDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub value: fn(&RunGroup) -> f64,
}

/// @ai:intent Histogram drawn once per coverage value
pub struct HistogramDefinition {
    pub name: &'static str,
    /// "Vertex" or "Edge"
    pub element: &'static str,
    /// "total" or "average"
    pub aggregate: &'static str,
    pub visits: fn(&GroupStatistics) -> Vec<(String, f64)>,
}

pub static GENERAL_CHARTS: [ChartDefinition; 16] = [
    ChartDefinition {
        name: "Total Time",
        title: "Total generation time per generator by coverage value",
        y_label: "Total Time (μs)",
        style: PlotStyle::Bars,
        value: total_time,
    },
    ChartDefinition {
        name: "Total Size",
        title: "Total test suite size per generator by coverage value",
        y_label: "Total Size (element count)",
        style: PlotStyle::Bars,
        value: total_size,
    },
    ChartDefinition {
        name: "Average Time",
        title: "Average generation time per generator by coverage value",
        y_label: "Average Time (μs)",
        style: PlotStyle::Bars,
        value: average_time,
    },
    ChartDefinition {
        name: "Average Size",
        title: "Average test suite size per generator by coverage value",
        y_label: "Average Size (element count)",
        style: PlotStyle::Bars,
        value: average_size,
    },
    ChartDefinition {
        name: "Minimum Time",
        title: "Minimum generation time per generator by coverage value",
        y_label: "Minimum Time (μs)",
        style: PlotStyle::Bars,
        value: min_time,
    },
    ChartDefinition {
        name: "Maximum Time",
        title: "Maximum generation time per generator by coverage value",
        y_label: "Maximum Time (μs)",
        style: PlotStyle::Bars,
        value: max_time,
    },
    ChartDefinition {
        name: "Minimum Size",
        title: "Minimum test suite size per generator by coverage value",
        y_label: "Minimum Size (element count)",
        style: PlotStyle::Bars,
        value: min_size,
    },
    ChartDefinition {
        name: "Maximum Size",
        title: "Maximum test suite size per generator by coverage value",
        y_label: "Maximum Size (element count)",
        style: PlotStyle::Bars,
        value: max_size,
    },
    ChartDefinition {
        name: "Max-Min Size",
        title: "Difference between maximum and minimum test suite size per generator by coverage value",
        y_label: "Difference (element count)",
        style: PlotStyle::Bars,
        value: size_spread,
    },
    ChartDefinition {
        name: "Max-Min Time",
        title: "Difference between maximum and minimum generation time per generator by coverage value",
        y_label: "Difference (μs)",
        style: PlotStyle::Bars,
        value: time_spread,
    },
    ChartDefinition {
        name: "Coverage vs Time",
        title: "Coverage vs Generation time per generator",
        y_label: "Time (μs)",
        style: PlotStyle::Lines,
        value: total_time,
    },
    ChartDefinition {
        name: "Size over Time",
        title: "Average test suite size divided by average generation time per generator by coverage value",
        y_label: "Size/Time (element count/μs)",
        style: PlotStyle::Bars,
        value: size_over_time,
    },
    ChartDefinition {
        name: "Average Vertex Visits %",
        title: "Percentage of unique vertices visited in an average traversal",
        y_label: "Average Percentage (%)",
        style: PlotStyle::Bars,
        value: vertex_percentage,
    },
    ChartDefinition {
        name: "Average Edge Visits %",
        title: "Percentage of unique edges visited in an average traversal",
        y_label: "Average Percentage (%)",
        style: PlotStyle::Bars,
        value: edge_percentage,
    },
    ChartDefinition {
        name: "Average vs Minimum Time",
        title: "Average generation time compared to minimum generation time per generator by coverage value",
        y_label: "Time (μs)",
        style: PlotStyle::Bars,
        value: average_over_min_time,
    },
    ChartDefinition {
        name: "Average vs Minimum Size",
        title: "Average test suite size compared to minimum test suite size per generator by coverage value",
        y_label: "Size (element count)",
        style: PlotStyle::Bars,
        value: average_over_min_size,
    },
];

pub static TEST_EXECUTION_CHARTS: [TestChartDefinition; 3] = [
    TestChartDefinition {
        name: "Average Test Execution Time",
        title: "Average test execution time per generator by coverage value",
        y_label: "Average Time (μs)",
        value: RunGroup::average_test_duration,
    },
    TestChartDefinition {
        name: "Minimum Test Execution Time",
        title: "Minimum test execution time per generator by coverage value",
        y_label: "Minimum Time (μs)",
        value: min_test_duration,
    },
    TestChartDefinition {
        name: "Maximum Test Execution Time",
        title: "Maximum test execution time per generator by coverage value",
        y_label: "Maximum Time (μs)",
        value: max_test_duration,
    },
];

pub static HISTOGRAM_CHARTS: [HistogramDefinition; 4] = [
    HistogramDefinition {
        name: "Histogram Total Visited Vertices",
        element: "Vertex",
        aggregate: "total",
        visits: total_vertex_visits,
    },
    HistogramDefinition {
        name: "Histogram Total Visited Edges",
        element: "Edge",
        aggregate: "total",
        visits: total_edge_visits,
    },
    HistogramDefinition {
        name: "Histogram Average Visited Vertices",
        element: "Vertex",
        aggregate: "average",
        visits: average_vertex_visits,
    },
    HistogramDefinition {
        name: "Histogram Average Visited Edges",
        element: "Edge",
        aggregate: "average",
        visits: average_edge_visits,
    },
];

fn total_time(g: &GroupStatistics) -> Option<f64> {
    Some(g.total_generation_time as f64)
}

fn total_size(g: &GroupStatistics) -> Option<f64> {
    Some(g.total_test_suite_size as f64)
}

fn average_time(g: &GroupStatistics) -> Option<f64> {
    Some(g.average_generation_time)
}

fn average_size(g: &GroupStatistics) -> Option<f64> {
    Some(g.average_test_suite_size)
}

fn min_time(g: &GroupStatistics) -> Option<f64> {
    Some(g.min_generation_time as f64)
}

fn max_time(g: &GroupStatistics) -> Option<f64> {
    Some(g.max_generation_time as f64)
}

fn min_size(g: &GroupStatistics) -> Option<f64> {
    Some(g.min_test_suite_size as f64)
}

fn max_size(g: &GroupStatistics) -> Option<f64> {
    Some(g.max_test_suite_size as f64)
}

fn size_spread(g: &GroupStatistics) -> Option<f64> {
    Some(g.max_test_suite_size as f64 - g.min_test_suite_size as f64)
}

fn time_spread(g: &GroupStatistics) -> Option<f64> {
    Some(g.max_generation_time as f64 - g.min_generation_time as f64)
}

fn size_over_time(g: &GroupStatistics) -> Option<f64> {
    g.size_over_time
}

fn vertex_percentage(g: &GroupStatistics) -> Option<f64> {
    g.vertex_visit_percentage
}

fn edge_percentage(g: &GroupStatistics) -> Option<f64> {
    g.edge_visit_percentage
}

fn average_over_min_time(g: &GroupStatistics) -> Option<f64> {
    Some(g.average_generation_time - g.min_generation_time as f64)
}

fn average_over_min_size(g: &GroupStatistics) -> Option<f64> {
    Some(g.average_test_suite_size - g.min_test_suite_size as f64)
}

fn min_test_duration(g: &RunGroup) -> f64 {
    g.minimum_test_duration() as f64
}

fn max_test_duration(g: &RunGroup) -> f64 {
    g.maximum_test_duration() as f64
}

fn total_vertex_visits(g: &GroupStatistics) -> Vec<(String, f64)> {
    g.total_vertex_visits
        .iter()
        .map(|(id, v)| (id.clone(), *v as f64))
        .collect()
}

fn total_edge_visits(g: &GroupStatistics) -> Vec<(String, f64)> {
    g.total_edge_visits
        .iter()
        .map(|(id, v)| (id.clone(), *v as f64))
        .collect()
}

fn average_vertex_visits(g: &GroupStatistics) -> Vec<(String, f64)> {
    g.average_vertex_visits
        .iter()
        .map(|(id, v)| (id.clone(), *v))
        .collect()
}

fn average_edge_visits(g: &GroupStatistics) -> Vec<(String, f64)> {
    g.average_edge_visits
        .iter()
        .map(|(id, v)| (id.clone(), *v))
        .collect()
}

/// @ai:intent Builds every chart of the catalog from a statistics summary
pub struct ChartCatalog;

impl ChartCatalog {
    /// @ai:intent Build general, test execution and per-coverage histogram charts, in that order
    /// @ai:effects pure
    pub fn build(summary: &StatisticsSummary, run_groups: &[RunGroup]) -> Vec<Chart> {
        let mut charts: Vec<Chart> = GENERAL_CHARTS
            .iter()
            .map(|def| Self::general_chart(def, summary))
            .collect();

        if Self::test_execution_available(run_groups) {
            charts.extend(
                TEST_EXECUTION_CHARTS
                    .iter()
                    .map(|def| Self::test_execution_chart(def, summary, run_groups)),
            );
        } else if run_groups.is_empty() {
            tracing::info!("No test results found, skipping test execution charts");
        } else {
            tracing::warn!("Skipping test execution charts: some runs did not complete their tests");
        }

        let coverage_values = summary.coverage_values();

        for def in &HISTOGRAM_CHARTS {
            for coverage in &coverage_values {
                charts.push(Self::histogram_chart(def, summary, *coverage));
            }
        }

        tracing::debug!("Built {} charts", charts.len());
        charts
    }

    /// @ai:intent Test execution charts need run groups, all of them successful
    /// @ai:effects pure
    pub fn test_execution_available(run_groups: &[RunGroup]) -> bool {
        !run_groups.is_empty() && run_groups.iter().all(|g| g.successful_runs)
    }

    fn bar_width(generator_count: usize) -> f64 {
        BAR_SPAN / generator_count.max(1) as f64
    }

    /// @ai:intent Bar or line chart with one series per generator
    /// @ai:effects pure
    pub fn general_chart(def: &ChartDefinition, summary: &StatisticsSummary) -> Chart {
        let bar_width = Self::bar_width(summary.generators.len());
        let x_ticks: Vec<u32> = summary
            .generators
            .values()
            .next()
            .map(|groups| groups.iter().map(|g| g.stop_coverage).collect())
            .unwrap_or_default();

        let series = summary
            .generators
            .iter()
            .enumerate()
            .map(|(i, (name, groups))| {
                let offset = match def.style {
                    PlotStyle::Bars => i as f64 * bar_width,
                    PlotStyle::Lines => 0.0,
                };

                let points: Vec<(f64, f64)> = groups
                    .iter()
                    .filter_map(|g| (def.value)(g).map(|v| (g.stop_coverage as f64 + offset, v)))
                    .collect();

                let trend = match def.style {
                    PlotStyle::Bars => trend_line(&points),
                    PlotStyle::Lines => Vec::new(),
                };

                Series {
                    label: name.clone(),
                    points,
                    trend,
                }
            })
            .collect();

        let plot = match def.style {
            PlotStyle::Bars => Plot::Bars {
                series,
                bar_width,
                x_ticks,
            },
            PlotStyle::Lines => Plot::Lines { series, x_ticks },
        };

        Chart {
            name: def.name.to_string(),
            title: def.title.to_string(),
            x_label: COVERAGE_LABEL.to_string(),
            y_label: def.y_label.to_string(),
            plot,
        }
    }

    /// @ai:intent Bar chart over run groups of the generators kept in the summary
    /// @ai:effects pure
    pub fn test_execution_chart(
        def: &TestChartDefinition,
        summary: &StatisticsSummary,
        run_groups: &[RunGroup],
    ) -> Chart {
        let bar_width = Self::bar_width(summary.generators.len());

        let mut by_algorithm: IndexMap<&str, Vec<&RunGroup>> = IndexMap::new();

        for group in run_groups
            .iter()
            .filter(|g| summary.generators.contains_key(g.algorithm.as_str()))
        {
            by_algorithm
                .entry(group.algorithm.as_str())
                .or_default()
                .push(group);
        }

        let x_ticks: Vec<u32> = by_algorithm
            .values()
            .next()
            .map(|groups| groups.iter().map(|g| g.stop_coverage).collect())
            .unwrap_or_default();

        let series = by_algorithm
            .iter()
            .enumerate()
            .map(|(i, (algorithm, groups))| {
                let points: Vec<(f64, f64)> = groups
                    .iter()
                    .map(|g| (g.stop_coverage as f64 + i as f64 * bar_width, (def.value)(g)))
                    .collect();

                Series {
                    label: algorithm.to_string(),
                    trend: trend_line(&points),
                    points,
                }
            })
            .collect();

        Chart {
            name: def.name.to_string(),
            title: def.title.to_string(),
            x_label: COVERAGE_LABEL.to_string(),
            y_label: def.y_label.to_string(),
            plot: Plot::Bars {
                series,
                bar_width,
                x_ticks,
            },
        }
    }

    /// @ai:intent Visit count histogram of every generator active at one coverage value
    /// @ai:effects pure
    pub fn histogram_chart(def: &HistogramDefinition, summary: &StatisticsSummary, coverage: u32) -> Chart {
        let series = summary
            .generators
            .iter()
            .flat_map(|(name, groups)| {
                groups
                    .iter()
                    .filter(move |g| g.stop_coverage == coverage)
                    .map(move |g| HistogramSeries {
                        label: name.clone(),
                        bins: sorted_bins((def.visits)(g)),
                    })
            })
            .collect();

        Chart {
            name: format!("{} - {}%", def.name, coverage),
            title: format!(
                "{} {} visit count histogram for coverage value {}%",
                def.element, def.aggregate, coverage
            ),
            x_label: def.element.to_string(),
            y_label: "Visit Count".to_string(),
            plot: Plot::Histogram { series },
        }
    }
}

/// Sorts most visited first and truncates counts to whole visits.
fn sorted_bins(mut visits: Vec<(String, f64)>) -> Vec<(String, u64)> {
    visits.sort_by(|a, b| b.1.total_cmp(&a.1));
    visits
        .into_iter()
        .map(|(id, count)| (id, count as u64))
        .collect()
}
