//! View system for the sheet explorer page

pub mod plots;
mod stats;
mod tables;

pub use plots::{
    BoxPlotConfig, BoxPlotView, HistogramConfig, HistogramView, ScatterPlotConfig,
    ScatterPlotView, DEFAULT_BINS, MAX_BINS, MIN_BINS,
};
pub use stats::{ColumnSummary, SummaryStatsView};
pub use tables::{PreviewConfig, PreviewTable};
