//! Chart views for the exploration page

pub mod box_plot;
pub mod histogram;
pub mod scatter;
pub mod utils;

pub use box_plot::{BoxPlotConfig, BoxPlotView};
pub use histogram::{HistogramConfig, HistogramView, DEFAULT_BINS, MAX_BINS, MIN_BINS};
pub use scatter::{ScatterPlotConfig, ScatterPlotView};
