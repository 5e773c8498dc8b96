//! @ai:module:intent Chart catalog, trend fitting and bitmap rendering
//! @ai:module:layer application
//! @ai:module:public_api Chart, ChartCatalog, ChartRenderer, ChartRendererTrait, trend_line

pub mod catalog;
pub mod render;
pub mod trend;

pub use catalog::{
    Chart, ChartCatalog, HistogramSeries, Plot, Series, GENERAL_CHARTS, HISTOGRAM_CHARTS,
    TEST_EXECUTION_CHARTS,
};
pub use render::{ChartRenderer, ChartRendererTrait};
pub use trend::{trend_line, Polynomial};
