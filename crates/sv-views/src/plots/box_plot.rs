//! Box plot comparison of several variables on one value axis

use egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, Polygon};
use sv_data::{long_form, SheetTable};

use super::utils::colors::categorical_color;
use super::utils::stats::calculate_quartiles;

/// Configuration for box plot
#[derive(Debug, Clone)]
pub struct BoxPlotConfig {
    /// Variables to compare, one box per column
    pub columns: Vec<String>,

    /// Whether to show outliers
    pub show_outliers: bool,

    /// Whether to show mean marker
    pub show_mean: bool,

    /// Box width
    pub box_width: f32,

    /// Whether to show grid
    pub show_grid: bool,
}

impl BoxPlotConfig {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            show_outliers: true,
            show_mean: true,
            box_width: 0.5,
            show_grid: true,
        }
    }
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Box plot view
pub struct BoxPlotView {
    pub config: BoxPlotConfig,
}

#[derive(Debug, Clone)]
struct BoxStats {
    min: f64,
    q1: f64,
    median: f64,
    q3: f64,
    max: f64,
    mean: f64,
    outliers: Vec<f64>,
}

fn calculate_box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }

    let (q1, median, q3) = calculate_quartiles(values);

    let mean = values.iter().sum::<f64>() / values.len() as f64;

    // 1.5 IQR fences; whiskers reach the most extreme non-outlier values
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let outliers: Vec<f64> = values
        .iter()
        .filter(|&&v| v < lower_fence || v > upper_fence)
        .copied()
        .collect();

    let whisker_min = values
        .iter()
        .filter(|&&v| v >= lower_fence)
        .min_by(|&&a, &&b| a.total_cmp(&b))
        .copied()
        .unwrap_or(q1);

    let whisker_max = values
        .iter()
        .filter(|&&v| v <= upper_fence)
        .max_by(|&&a, &&b| a.total_cmp(&b))
        .copied()
        .unwrap_or(q3);

    Some(BoxStats {
        min: whisker_min,
        q1,
        median,
        q3,
        max: whisker_max,
        mean,
        outliers,
    })
}

impl BoxPlotView {
    pub fn new() -> Self {
        Self {
            config: BoxPlotConfig::new(),
        }
    }

    fn draw_box(&self, plot_ui: &mut egui_plot::PlotUi, x: f64, stats: &BoxStats, color: Color32) {
        let half_width = (self.config.box_width / 2.0) as f64;

        // Box (Q1 to Q3)
        let box_points = vec![
            [x - half_width, stats.q1],
            [x + half_width, stats.q1],
            [x + half_width, stats.q3],
            [x - half_width, stats.q3],
        ];
        plot_ui.polygon(
            Polygon::new(PlotPoints::new(box_points))
                .fill_color(color.linear_multiply(0.3))
                .stroke(egui::Stroke::new(2.0, color)),
        );

        // Median line
        plot_ui.line(
            Line::new(vec![
                [x - half_width, stats.median],
                [x + half_width, stats.median],
            ])
            .color(color)
            .width(3.0),
        );

        // Whiskers
        plot_ui.line(
            Line::new(vec![[x, stats.q3], [x, stats.max]])
                .color(color)
                .width(1.5),
        );
        plot_ui.line(
            Line::new(vec![[x, stats.q1], [x, stats.min]])
                .color(color)
                .width(1.5),
        );

        // Whisker caps
        let cap_width = half_width * 0.5;
        plot_ui.line(
            Line::new(vec![
                [x - cap_width, stats.max],
                [x + cap_width, stats.max],
            ])
            .color(color)
            .width(1.5),
        );
        plot_ui.line(
            Line::new(vec![
                [x - cap_width, stats.min],
                [x + cap_width, stats.min],
            ])
            .color(color)
            .width(1.5),
        );

        if self.config.show_mean {
            plot_ui.points(
                Points::new(vec![[x, stats.mean]])
                    .color(color)
                    .radius(4.0)
                    .shape(egui_plot::MarkerShape::Diamond),
            );
        }

        if self.config.show_outliers && !stats.outliers.is_empty() {
            let outlier_points: Vec<[f64; 2]> = stats.outliers.iter().map(|&y| [x, y]).collect();
            plot_ui.points(
                Points::new(outlier_points)
                    .color(color.linear_multiply(0.7))
                    .radius(3.0)
                    .shape(egui_plot::MarkerShape::Circle),
            );
        }
    }

    pub fn ui(&mut self, table: &SheetTable, ui: &mut Ui) {
        if self.config.columns.is_empty() {
            // Degraded, not fatal: warn and render nothing for this section
            ui.colored_label(
                Color32::from_rgb(255, 200, 80),
                "Select at least one variable to compare.",
            );
            return;
        }

        // Stack the selected columns into long form, then one box per variable
        let stacked = long_form(table, &self.config.columns);

        let boxes: Vec<(String, BoxStats)> = self
            .config
            .columns
            .iter()
            .filter_map(|name| {
                let values: Vec<f64> = stacked
                    .iter()
                    .filter(|row| &row.variable == name)
                    .filter_map(|row| row.value)
                    .collect();
                calculate_box_stats(&values).map(|stats| (name.clone(), stats))
            })
            .collect();

        if boxes.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        }

        let plot = Plot::new("box_plot_comparison")
            .height(350.0)
            .legend(Legend::default())
            .show_grid(self.config.show_grid)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true)
            .y_axis_label("Value");

        plot.show(ui, |plot_ui| {
            for (i, (name, stats)) in boxes.iter().enumerate() {
                let color = categorical_color(i);

                self.draw_box(plot_ui, i as f64, stats, color);

                // Hidden point carries the variable name into the legend
                plot_ui.points(
                    Points::new(vec![[i as f64, stats.median]])
                        .color(color)
                        .radius(0.0)
                        .name(name),
                );
            }
        });
    }
}

impl Default for BoxPlotView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_stats_for_simple_values() {
        let stats = calculate_box_stats(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert!((stats.q1 - 17.5).abs() < 1e-9);
        assert!((stats.median - 25.0).abs() < 1e-9);
        assert!((stats.q3 - 32.5).abs() < 1e-9);
        assert!((stats.mean - 25.0).abs() < 1e-9);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 40.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn far_value_becomes_an_outlier() {
        let stats = calculate_box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(stats.outliers, vec![100.0]);
        // Whisker stops at the largest non-outlier value
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn empty_values_yield_no_stats() {
        assert!(calculate_box_stats(&[]).is_none());
    }
}
