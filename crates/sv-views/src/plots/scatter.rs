//! Scatter plot implementation

use egui::{Color32, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoints, Points};
use sv_data::SheetTable;
use tracing::warn;

/// Configuration for scatter plot view
#[derive(Clone)]
pub struct ScatterPlotConfig {
    /// X-axis column
    pub x_column: String,

    /// Y-axis column (may equal the X column)
    pub y_column: String,

    /// Base point radius
    pub point_radius: f32,

    /// Whether to show grid
    pub show_grid: bool,

    /// Marker shape
    pub marker_shape: MarkerShape,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            x_column: String::new(),
            y_column: String::new(),
            point_radius: 3.0,
            show_grid: true,
            marker_shape: MarkerShape::Circle,
        }
    }
}

/// Scatter plot view
pub struct ScatterPlotView {
    pub config: ScatterPlotConfig,
}

/// One plotted point, keeping its source row for the hover tooltip.
struct ScatterPoint {
    row: usize,
    x: f64,
    y: f64,
}

impl ScatterPlotView {
    pub fn new() -> Self {
        Self {
            config: ScatterPlotConfig::default(),
        }
    }

    /// One point per row where both coordinates are present.
    fn collect_points(&self, table: &SheetTable) -> Vec<ScatterPoint> {
        let Some(xs) = table.numeric_values(&self.config.x_column) else {
            warn!("Scatter X column '{}' is not numeric", self.config.x_column);
            return Vec::new();
        };
        let Some(ys) = table.numeric_values(&self.config.y_column) else {
            warn!("Scatter Y column '{}' is not numeric", self.config.y_column);
            return Vec::new();
        };

        xs.iter()
            .zip(ys.iter())
            .enumerate()
            .filter_map(|(row, (x, y))| match (x, y) {
                (Some(x), Some(y)) => Some(ScatterPoint { row, x: *x, y: *y }),
                _ => None,
            })
            .collect()
    }

    pub fn ui(&mut self, table: &SheetTable, ui: &mut Ui) {
        let points = self.collect_points(table);

        if points.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        }

        let plot = Plot::new(("scatter", &self.config.x_column, &self.config.y_column))
            .height(350.0)
            .show_grid(self.config.show_grid)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true)
            .x_axis_label(&self.config.x_column)
            .y_axis_label(&self.config.y_column);

        let hovered = plot
            .show(ui, |plot_ui| {
                let plot_points: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();

                plot_ui.points(
                    Points::new(PlotPoints::new(plot_points))
                        .color(Color32::from_rgb(31, 119, 180))
                        .radius(self.config.point_radius)
                        .shape(self.config.marker_shape)
                        .name(format!(
                            "{} vs {}",
                            self.config.y_column, self.config.x_column
                        )),
                );

                // Pick the nearest point within 2% of the visible bounds
                let pointer = plot_ui.pointer_coordinate()?;
                let bounds = plot_ui.plot_bounds();
                let rx = bounds.width() * 0.02;
                let ry = bounds.height() * 0.02;
                if rx <= 0.0 || ry <= 0.0 {
                    return None;
                }

                let nearest = points
                    .iter()
                    .map(|p| {
                        let dx = (p.x - pointer.x) / rx;
                        let dy = (p.y - pointer.y) / ry;
                        (p, dx * dx + dy * dy)
                    })
                    .filter(|(_, d2)| *d2 <= 1.0)
                    .min_by(|a, b| a.1.total_cmp(&b.1))?;

                let (point, _) = nearest;
                plot_ui.points(
                    Points::new(vec![[point.x, point.y]])
                        .color(Color32::from_rgb(255, 127, 14))
                        .radius(self.config.point_radius * 2.0)
                        .shape(MarkerShape::Circle),
                );

                Some(point.row)
            })
            .inner;

        // Tooltip lists every numeric column's value for the hovered row
        if let Some(row) = hovered {
            egui::show_tooltip_at_pointer(ui.ctx(), egui::Id::new("scatter_tooltip"), |ui| {
                for name in table.numeric_columns() {
                    let text = table
                        .numeric_values(&name)
                        .and_then(|values| values.get(row).copied().flatten())
                        .map(|v| format!("{v}"))
                        .unwrap_or_else(|| "-".to_string());
                    ui.label(format!("{name}: {text}"));
                }
            });
        }
    }
}

impl Default for ScatterPlotView {
    fn default() -> Self {
        Self::new()
    }
}
