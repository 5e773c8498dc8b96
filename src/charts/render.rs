//! @ai:module:intent Draw catalog charts to PNG files with plotters
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartRenderer, ChartRendererTrait
//! @ai:module:stateless true

use crate::charts::catalog::{Chart, HistogramSeries, Plot, Series};
use crate::config::ChartConfig;
use crate::error::{ReportError, Result};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::Path;

const FONT: &str = "sans-serif";

/// @ai:intent Trait for turning a chart into an image file
pub trait ChartRendererTrait: Send + Sync {
    /// @ai:intent Render one chart to `output_path`
    fn render(&self, chart: &Chart, output_path: &Path) -> Result<()>;
}

/// @ai:intent Bitmap chart renderer
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl ChartRenderer {
    /// @ai:intent Create a renderer with the default raster size
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::from_config(&ChartConfig::default())
    }

    /// @ai:effects pure
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// @ai:intent Grouped bars with a dashed trend line per series
    /// @ai:effects fs:write
    fn draw_bars(
        &self,
        chart: &Chart,
        series: &[Series],
        bar_width: f64,
        x_ticks: &[u32],
        output_path: &Path,
    ) -> anyhow::Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let x_span = x_range(series, x_ticks, bar_width);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_span.clone(), y_range(series))?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(x_label_count(&x_span))
            .x_label_formatter(&|x| coverage_label(*x, x_ticks))
            .draw()?;

        let half = bar_width / 2.0;

        for (i, s) in series.iter().enumerate() {
            let color = Palette99::pick(i).mix(0.8);

            ctx.draw_series(s.points.iter().map(|(x, y)| {
                Rectangle::new([(x - half, 0.0), (x + half, *y)], color.filled())
            }))?
            .label(s.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));

            if !s.trend.is_empty() {
                ctx.draw_series(DashedLineSeries::new(
                    s.trend.iter().copied(),
                    8,
                    4,
                    color.stroke_width(2),
                ))?;
            }
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent One line per series
    /// @ai:effects fs:write
    fn draw_lines(
        &self,
        chart: &Chart,
        series: &[Series],
        x_ticks: &[u32],
        output_path: &Path,
    ) -> anyhow::Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let x_span = x_range(series, x_ticks, 1.0);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_span.clone(), y_range(series))?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(x_label_count(&x_span))
            .x_label_formatter(&|x| coverage_label(*x, x_ticks))
            .draw()?;

        for (i, s) in series.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();

            ctx.draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            ctx.draw_series(
                s.points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, color.filled())),
            )?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Overlaid translucent histograms, one per generator
    /// @ai:effects fs:write
    fn draw_histogram(
        &self,
        chart: &Chart,
        series: &[HistogramSeries],
        output_path: &Path,
    ) -> anyhow::Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let bins = series.iter().map(|s| s.bins.len()).max().unwrap_or(0).max(1);
        let top = series
            .iter()
            .flat_map(|s| s.bins.iter().map(|(_, count)| *count))
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..bins as f64 - 0.5, 0.0..top * 1.1)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|_| String::new())
            .draw()?;

        for (i, s) in series.iter().enumerate() {
            let color = Palette99::pick(i).mix(0.5);

            ctx.draw_series(s.bins.iter().enumerate().map(|(bin, (_, count))| {
                let x = bin as f64;
                Rectangle::new([(x - 0.5, 0.0), (x + 0.5, *count as f64)], color.filled())
            }))?
            .label(s.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRendererTrait for ChartRenderer {
    /// @ai:intent Render a chart according to its plot kind
    /// @ai:effects fs:write
    fn render(&self, chart: &Chart, output_path: &Path) -> Result<()> {
        tracing::debug!("Rendering chart {:?} to {:?}", chart.name, output_path);

        let drawn = match &chart.plot {
            Plot::Bars {
                series,
                bar_width,
                x_ticks,
            } => self.draw_bars(chart, series, *bar_width, x_ticks, output_path),
            Plot::Lines { series, x_ticks } => self.draw_lines(chart, series, x_ticks, output_path),
            Plot::Histogram { series } => self.draw_histogram(chart, series, output_path),
        };

        drawn.map_err(|e| ReportError::Chart {
            name: chart.name.clone(),
            message: format!("{e:#}"),
        })
    }
}

/// X axis span covering every point and tick, padded by `pad` on both sides.
fn x_range(series: &[Series], x_ticks: &[u32], pad: f64) -> Range<f64> {
    let xs = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(x, _)| *x))
        .chain(x_ticks.iter().map(|t| *t as f64));

    let (min, max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });

    if min > max {
        return 0.0..100.0;
    }

    (min - pad)..(max + pad)
}

/// Enough key points for a unit step, so every integer coverage gets one.
fn x_label_count(range: &Range<f64>) -> usize {
    (range.end - range.start).ceil().max(1.0) as usize + 2
}

/// Text for an x axis key point: the stop coverage it sits on, blank elsewhere.
fn coverage_label(x: f64, x_ticks: &[u32]) -> String {
    if x_ticks.iter().any(|t| (f64::from(*t) - x).abs() < 1e-6) {
        format!("{:.0}", x)
    } else {
        String::new()
    }
}

/// Y axis span from zero (or the lowest negative value) to ten percent above the highest value.
fn y_range(series: &[Series]) -> Range<f64> {
    let ys = series
        .iter()
        .flat_map(|s| s.points.iter().chain(s.trend.iter()).map(|(_, y)| *y))
        .filter(|y| y.is_finite());

    let (min, max) = ys.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));

    let span = max - min;
    if span <= 0.0 {
        return 0.0..1.0;
    }

    let pad = span * 0.1;
    let low = if min < 0.0 { min - pad } else { 0.0 };
    low..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn series(points: Vec<(f64, f64)>) -> Series {
        Series {
            label: "Random".to_string(),
            trend: vec![],
            points,
        }
    }

    #[test]
    fn test_empty_chart_has_valid_ranges() {
        assert_eq!(x_range(&[], &[], 1.0), 0.0..100.0);
        assert_eq!(y_range(&[]), 0.0..1.0);
        assert_eq!(y_range(&[series(vec![(50.0, 0.0)])]), 0.0..1.0);
    }

    #[test]
    fn test_x_range_covers_offset_bars() {
        let range = x_range(&[series(vec![(50.0, 1.0), (103.0, 2.0)])], &[50, 100], 3.0);
        assert_eq!(range, 47.0..106.0);
    }

    #[test]
    fn test_y_range_starts_at_zero_with_headroom() {
        let range = y_range(&[series(vec![(50.0, 10.0), (100.0, 100.0)])]);
        assert_eq!(range.start, 0.0);
        assert!((range.end - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_range_includes_negative_trend() {
        let mut s = series(vec![(50.0, 10.0)]);
        s.trend = vec![(50.0, -10.0)];
        let range = y_range(&[s]);
        assert!(range.start < -10.0);
        assert!(range.end > 10.0);
    }

    fn chart(name: &str, plot: Plot) -> Chart {
        Chart {
            name: name.to_string(),
            title: name.to_string(),
            x_label: "Stop Coverage (%)".to_string(),
            y_label: "Time (ms)".to_string(),
            plot,
        }
    }

    #[test]
    fn test_only_stop_coverages_are_labelled() {
        let ticks = [50, 100];
        assert_eq!(coverage_label(50.0, &ticks), "50");
        assert_eq!(coverage_label(100.0, &ticks), "100");
        assert_eq!(coverage_label(60.0, &ticks), "");
        assert_eq!(coverage_label(50.5, &ticks), "");
        assert_eq!(coverage_label(50.0, &[]), "");
    }

    #[test]
    fn test_label_count_allows_unit_steps() {
        assert_eq!(x_label_count(&(47.0..106.0)), 61);
        assert_eq!(x_label_count(&(0.0..0.0)), 3);
    }

    #[test]
    fn test_render_writes_png_for_each_plot_kind() {
        let temp = TempDir::new().unwrap();
        let renderer = ChartRenderer::from_config(&ChartConfig {
            width: 320,
            height: 240,
        });

        let mut trended = series(vec![(49.0, 10.0), (99.0, 30.0)]);
        trended.trend = vec![(49.0, 12.0), (99.0, 28.0)];

        let charts = vec![
            chart(
                "bars",
                Plot::Bars {
                    series: vec![trended],
                    bar_width: 2.0,
                    x_ticks: vec![50, 100],
                },
            ),
            chart(
                "lines",
                Plot::Lines {
                    series: vec![series(vec![(50.0, 1.0), (100.0, 3.0)])],
                    x_ticks: vec![50, 100],
                },
            ),
            chart(
                "empty bars",
                Plot::Bars {
                    series: vec![],
                    bar_width: 2.0,
                    x_ticks: vec![],
                },
            ),
            chart("empty histogram", Plot::Histogram { series: vec![] }),
        ];

        for c in &charts {
            let path = temp.path().join(format!("{}.png", c.name));
            renderer.render(c, &path).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0, "{} is empty", c.name);
        }
    }

    #[test]
    fn test_renderer_uses_configured_size() {
        let renderer = ChartRenderer::from_config(&ChartConfig {
            width: 640,
            height: 480,
        });
        assert_eq!((renderer.width, renderer.height), (640, 480));
        assert_eq!(ChartRenderer::default().width, 1280);
    }
}
