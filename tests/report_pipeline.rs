use gwbench_report::benchmark::load_benchmark;
use gwbench_report::charts::{Chart, ChartRendererTrait, Plot};
use gwbench_report::config::FilterConfig;
use gwbench_report::metrics::{Benchmark, StatisticsSummary};
use gwbench_report::report::{
    generate_report, ConfirmWith, PdfRendererTrait, ReportGenerator, ReportKind, HTML_FILE,
    STATISTICS_FILE,
};
use gwbench_report::ReportError;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingRenderer {
    rendered: Mutex<Vec<Chart>>,
}

impl RecordingRenderer {
    fn charts(&self) -> Vec<Chart> {
        self.rendered.lock().unwrap().clone()
    }
}

impl ChartRendererTrait for RecordingRenderer {
    fn render(&self, chart: &Chart, output_path: &Path) -> gwbench_report::Result<()> {
        std::fs::write(output_path, chart.name.as_bytes())?;
        self.rendered.lock().unwrap().push(chart.clone());
        Ok(())
    }
}

struct NoPdf;

impl PdfRendererTrait for NoPdf {
    fn render(&self, _html_path: &Path, _pdf_path: &Path) -> gwbench_report::Result<()> {
        Err(ReportError::Pdf("not available in tests".to_string()))
    }
}

fn write_run(
    root: &Path,
    dir: &str,
    generator: &str,
    coverage: u32,
    time: u64,
    tests: Option<serde_json::Value>,
) {
    let run_dir = root.join(dir);
    std::fs::create_dir_all(&run_dir).unwrap();

    let path = json!([{"id": "v0"}, {"id": "e0"}, {"id": "v1"}]);
    let report = json!({
        "generator": generator,
        "stopCoverage": coverage,
        "generationTime": time,
        "coverage": coverage,
        "model": {"vertices": 4, "edges": 4},
        "vertexVisits": {"v0": 2, "v1": 1, "v2": 0},
        "edgeVisits": {"e0": 1}
    });

    std::fs::write(run_dir.join("path.json"), path.to_string()).unwrap();
    std::fs::write(run_dir.join("report.json"), report.to_string()).unwrap();

    if let Some(tests) = tests {
        std::fs::write(run_dir.join("test_results.json"), tests.to_string()).unwrap();
    }
}

fn scenario(root: &Path, tests_for: impl Fn(&str) -> Option<serde_json::Value>) -> Benchmark {
    let bench = root.join("shop-model");

    write_run(&bench, "run-01", "Random", 50, 10, tests_for("run-01"));
    write_run(&bench, "run-02", "Random", 50, 20, tests_for("run-02"));
    write_run(&bench, "run-03", "Random", 100, 15, tests_for("run-03"));
    write_run(&bench, "run-04", "Random", 100, 25, tests_for("run-04"));
    write_run(&bench, "run-05", "Weighted", 50, 15, tests_for("run-05"));
    write_run(&bench, "run-06", "Weighted", 50, 25, tests_for("run-06"));
    write_run(&bench, "run-07", "Weighted", 100, 30, tests_for("run-07"));
    write_run(&bench, "run-08", "Weighted", 100, 40, tests_for("run-08"));

    load_benchmark(&bench).unwrap()
}

fn all_tests_pass(_: &str) -> Option<serde_json::Value> {
    Some(json!({"t1": 100, "t2": 50}))
}

fn chart_names(charts: &[Chart]) -> Vec<String> {
    charts.iter().map(|c| c.name.clone()).collect()
}

#[test]
fn test_group_averages_are_disjoint() {
    let temp = TempDir::new().unwrap();
    let benchmark = scenario(temp.path(), |_| None);
    let generator = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);

    let summary = generator.prepare(&benchmark).summary;

    assert_eq!(summary.benchmark, "shop-model");
    let random = &summary.generators["Random"];
    assert_eq!(random[0].average_generation_time, 15.0);
    assert_eq!(random[1].average_generation_time, 20.0);
    assert_eq!(summary.generators["Weighted"][0].average_generation_time, 20.0);
    assert!(summary.test_execution.is_empty());
}

#[test]
fn test_raw_data_and_html_share_statistics_and_charts() {
    let temp = TempDir::new().unwrap();
    let benchmark = scenario(temp.path(), all_tests_pass);

    let raw = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);
    let raw_dir = temp.path().join("raw");
    raw.generate(&benchmark, ReportKind::RawData, &raw_dir, &ConfirmWith(false))
        .unwrap();

    let html = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);
    let html_dir = temp.path().join("html");
    html.generate(&benchmark, ReportKind::Html, &html_dir, &ConfirmWith(false))
        .unwrap();

    assert_eq!(raw.chart_renderer().charts(), html.chart_renderer().charts());

    let written: StatisticsSummary =
        serde_json::from_str(&std::fs::read_to_string(raw_dir.join(STATISTICS_FILE)).unwrap())
            .unwrap();
    assert_eq!(written, html.prepare(&benchmark).summary);

    let page = std::fs::read_to_string(html_dir.join(HTML_FILE)).unwrap();
    assert!(page.contains("GraphWalker Benchmark Report: shop-model"));
    assert!(page.contains("images/Total%20Time.png"));
    assert!(html_dir.join("images").join("Total Time.png").exists());
}

#[test]
fn test_test_execution_charts_follow_success() {
    let temp = TempDir::new().unwrap();
    let passing = scenario(&temp.path().join("passing"), all_tests_pass);
    let failing = scenario(&temp.path().join("failing"), |run| {
        if run == "run-07" {
            Some(json!({"t1": 100, "t2": null}))
        } else {
            all_tests_pass(run)
        }
    });

    let generator = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);

    let names = chart_names(&generator.prepare(&passing).charts);
    assert!(names.contains(&"Average Test Execution Time".to_string()));
    assert!(names.contains(&"Maximum Test Execution Time".to_string()));

    let names = chart_names(&generator.prepare(&failing).charts);
    assert!(names.iter().all(|n| !n.contains("Test Execution")));
}

#[test]
fn test_histograms_per_coverage_value() {
    let temp = TempDir::new().unwrap();
    let benchmark = scenario(temp.path(), |_| None);
    let generator = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);

    let charts = generator.prepare(&benchmark).charts;
    let histograms: Vec<&Chart> = charts
        .iter()
        .filter(|c| c.name.starts_with("Histogram"))
        .collect();

    assert_eq!(
        histograms.iter().take(2).map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec![
            "Histogram Total Visited Vertices - 50%",
            "Histogram Total Visited Vertices - 100%"
        ]
    );
    assert_eq!(histograms.len(), 8);

    match &histograms[0].plot {
        Plot::Histogram { series } => {
            assert_eq!(series.len(), 2);
            assert_eq!(
                series[0].bins,
                vec![("v0".to_string(), 4), ("v1".to_string(), 2), ("v2".to_string(), 0)]
            );
        }
        other => panic!("unexpected plot {other:?}"),
    }
}

#[test]
fn test_whitelist_keeps_both_coverage_buckets() {
    let temp = TempDir::new().unwrap();
    let benchmark = scenario(temp.path(), all_tests_pass);
    let generator = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf)
        .with_filter(FilterConfig::new(Some(vec!["Random".to_string()]), Some(vec![])));

    let data = generator.prepare(&benchmark);

    assert_eq!(data.summary.generators.len(), 1);
    assert_eq!(data.summary.generators["Random"].len(), 2);
    assert!(data.summary.test_execution.iter().all(|g| g.algorithm == "Random"));
}

#[test]
fn test_unknown_kind_fails_before_writing() {
    let temp = TempDir::new().unwrap();
    let benchmark = scenario(temp.path(), |_| None);
    let generator = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);
    let output = temp.path().join("out");

    let err = generate_report(&generator, &benchmark, "xml", &output, &ConfirmWith(true)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::UnknownReportKind(kind)) if kind == "xml"
    ));
    assert!(!output.exists());
    assert!(generator.chart_renderer().charts().is_empty());
}

#[test]
fn test_pdf_failure_propagates() {
    let temp = TempDir::new().unwrap();
    let benchmark = scenario(temp.path(), |_| None);
    let generator = ReportGenerator::with_renderers(RecordingRenderer::default(), NoPdf);
    let output = temp.path().join("out");

    let err = generator
        .generate(&benchmark, ReportKind::Pdf, &output, &ConfirmWith(true))
        .unwrap_err();

    assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::Pdf(_))));
    assert!(output.join("temp").join(HTML_FILE).exists());
}
