//! Histogram implementation

use egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};
use sv_data::SheetTable;

/// Slider bounds for the bin-count widget.
pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 50;
pub const DEFAULT_BINS: usize = 20;

/// Configuration for histogram view
#[derive(Clone)]
pub struct HistogramConfig {
    /// Column to create histogram from
    pub column: String,

    /// Requested number of bins; clamped to [MIN_BINS, MAX_BINS]
    pub num_bins: usize,

    /// Bar color
    pub bar_color: Color32,

    /// Whether to show grid
    pub show_grid: bool,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            column: String::new(),
            num_bins: DEFAULT_BINS,
            bar_color: Color32::from_rgb(92, 140, 97),
            show_grid: true,
        }
    }
}

/// Histogram view
pub struct HistogramView {
    pub config: HistogramConfig,
}

struct Bin {
    start: f64,
    end: f64,
    count: usize,
}

/// Bucket values into at most `requested` equal-width bins spanning the
/// observed range. A zero-width range collapses to a single bin holding
/// every value.
fn build_bins(values: &[f64], requested: usize) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }

    let num_bins = requested.clamp(MIN_BINS, MAX_BINS);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![Bin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let bin_width = (max - min) / num_bins as f64;
    let mut bins = Vec::with_capacity(num_bins);

    for i in 0..num_bins {
        let start = min + i as f64 * bin_width;
        let end = start + bin_width;

        // The last bin is closed on both ends so `max` is not dropped
        let count = values
            .iter()
            .filter(|&&v| {
                if i == num_bins - 1 {
                    v >= start && v <= end
                } else {
                    v >= start && v < end
                }
            })
            .count();

        bins.push(Bin { start, end, count });
    }

    bins
}

impl HistogramView {
    pub fn new() -> Self {
        Self {
            config: HistogramConfig::default(),
        }
    }

    pub fn ui(&mut self, table: &SheetTable, ui: &mut Ui) {
        let values: Vec<f64> = table
            .numeric_values(&self.config.column)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        if values.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        }

        let bins = build_bins(&values, self.config.num_bins);

        let plot = Plot::new(("histogram", &self.config.column))
            .height(300.0)
            .show_grid(self.config.show_grid)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true)
            .x_axis_label(&self.config.column)
            .y_axis_label("Count");

        plot.show(ui, |plot_ui| {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|bin| {
                    let center = (bin.start + bin.end) / 2.0;
                    let width = (bin.end - bin.start).max(f64::EPSILON);
                    Bar::new(center, bin.count as f64)
                        .width(width)
                        .fill(self.config.bar_color.linear_multiply(0.7))
                })
                .collect();

            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(self.config.bar_color)
                    .name(&self.config.column),
            );
        });
    }
}

impl Default for HistogramView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_count_is_clamped_to_widget_range() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        assert_eq!(build_bins(&values, 1).len(), MIN_BINS);
        assert_eq!(build_bins(&values, 200).len(), MAX_BINS);
        assert_eq!(build_bins(&values, MIN_BINS).len(), MIN_BINS);
        assert_eq!(build_bins(&values, MAX_BINS).len(), MAX_BINS);
    }

    #[test]
    fn bins_span_the_observed_range() {
        let values = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let bins = build_bins(&values, 5);
        assert_eq!(bins.len(), 5);
        assert!((bins[0].start - 2.0).abs() < 1e-9);
        assert!((bins.last().unwrap().end - 10.0).abs() < 1e-9);
    }

    #[test]
    fn every_value_lands_in_exactly_one_bin() {
        let values = vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
        let bins = build_bins(&values, 7);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
    }

    #[test]
    fn maximum_value_is_counted_in_the_last_bin() {
        let values = vec![0.0, 5.0, 10.0];
        let bins = build_bins(&values, 5);
        assert_eq!(bins.last().unwrap().count, 1);
    }

    #[test]
    fn constant_column_collapses_to_one_bin() {
        let bins = build_bins(&[3.0, 3.0, 3.0], 20);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn no_values_no_bins() {
        assert!(build_bins(&[], 20).is_empty());
    }
}
