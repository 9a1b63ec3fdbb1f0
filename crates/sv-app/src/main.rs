//! Main application entry point

use anyhow::Result;
use eframe::egui::{self, Context, Ui};
use tracing::{error, info};

use sv_data::SheetTable;
use sv_views::{
    BoxPlotView, HistogramView, PreviewTable, ScatterPlotView, SummaryStatsView, DEFAULT_BINS,
    MAX_BINS, MIN_BINS,
};

/// The classroom sheet every session explores.
const SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1dCdajzIRGXOGPsbcp16ig2Z4aoTRGCUK51Rwfhv8Nbk/edit?gid=0#gid=0";

const APP_TITLE: &str = "Statistics Class: Data Exploration & Visualization";

const DESCRIPTION: &str = "This app loads a shared class spreadsheet and lets you practice \
exploring data: summary statistics, histograms, boxplot comparisons and scatter plots. \
Change the selections below and every section redraws from the same table.";

const CLOSING_REMARK: &str =
    "Try different variables and watch how the distributions and relationships change!";

/// Everything the widgets currently have selected. Owned by the UI layer;
/// views only read the values copied into their configs at render time.
struct Selections {
    summary_column: String,
    bin_count: usize,
    box_columns: Vec<String>,
    scatter_x: String,
    scatter_y: String,
}

impl Selections {
    /// Widget defaults derived from the numeric column set: boxplot compares
    /// the first two columns, scatter uses the first two axes (Y falls back
    /// to the first column when only one exists, so X == Y is reachable).
    fn defaults(numeric_columns: &[String]) -> Self {
        let first = numeric_columns.first().cloned().unwrap_or_default();
        let second = numeric_columns.get(1).cloned().unwrap_or_else(|| first.clone());

        Self {
            summary_column: first.clone(),
            bin_count: DEFAULT_BINS,
            box_columns: numeric_columns.iter().take(2).cloned().collect(),
            scatter_x: first,
            scatter_y: second,
        }
    }
}

/// Result of the one blocking load this session performs.
enum SessionState {
    Loaded {
        table: SheetTable,
        numeric_columns: Vec<String>,
    },
    Failed {
        message: String,
    },
}

/// Decides whether a fetched table can drive the page. A sheet with no
/// numeric columns fails the session even though the fetch succeeded.
fn session_from_table(table: SheetTable) -> SessionState {
    let numeric_columns = table.numeric_columns();
    if numeric_columns.is_empty() {
        error!("Sheet loaded but contains no numeric columns");
        return SessionState::Failed {
            message: "The sheet has no numeric columns, so no charts can be drawn.".to_string(),
        };
    }
    info!(
        "Sheet loaded: {} rows, {} numeric columns",
        table.num_rows(),
        numeric_columns.len()
    );
    SessionState::Loaded {
        table,
        numeric_columns,
    }
}

fn load_session(url: &str) -> SessionState {
    match SheetTable::fetch(url) {
        Ok(table) => session_from_table(table),
        Err(e) => {
            error!("Failed to load sheet: {}", e);
            SessionState::Failed {
                message: format!("Could not load the sheet ({e})."),
            }
        }
    }
}

/// Main application state
struct ExplorerApp {
    session: SessionState,
    selections: Selections,

    preview: PreviewTable,
    histogram: HistogramView,
    box_plot: BoxPlotView,
    scatter: ScatterPlotView,
}

impl ExplorerApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // One synchronous fetch per session; the UI blocks until it resolves
        let session = load_session(SHEET_URL);

        let selections = match &session {
            SessionState::Loaded {
                numeric_columns, ..
            } => Selections::defaults(numeric_columns),
            SessionState::Failed { .. } => Selections::defaults(&[]),
        };

        Self {
            session,
            selections,
            preview: PreviewTable::new(),
            histogram: HistogramView::new(),
            box_plot: BoxPlotView::new(),
            scatter: ScatterPlotView::new(),
        }
    }

    fn show_error_page(ui: &mut Ui, message: &str) {
        ui.add_space(12.0);
        ui.colored_label(
            egui::Color32::from_rgb(240, 100, 100),
            egui::RichText::new(message).size(16.0),
        );
    }

    fn show_page(&mut self, ui: &mut Ui) {
        let (table, numeric_columns) = match &self.session {
            SessionState::Loaded {
                table,
                numeric_columns,
            } => (table, numeric_columns),
            SessionState::Failed { message } => {
                // Hard stop: no preview, no widgets, no charts
                Self::show_error_page(ui, message);
                return;
            }
        };

        ui.colored_label(
            egui::Color32::from_rgb(120, 220, 120),
            format!(
                "Loaded the class sheet: {} rows x {} columns.",
                table.num_rows(),
                table.num_columns()
            ),
        );

        // Data preview
        ui.add_space(8.0);
        ui.heading("Data preview");
        ui.group(|ui| {
            ui.set_max_height(240.0);
            self.preview.ui(table, ui);
        });

        // Summary statistics
        ui.add_space(8.0);
        ui.heading("Summary statistics");
        egui::ComboBox::from_label("Column to summarize")
            .selected_text(self.selections.summary_column.clone())
            .show_ui(ui, |ui| {
                for name in numeric_columns {
                    ui.selectable_value(
                        &mut self.selections.summary_column,
                        name.clone(),
                        name,
                    );
                }
            });
        SummaryStatsView::ui(ui, table, &self.selections.summary_column);

        // Histogram of the summarized column
        ui.add_space(8.0);
        ui.heading("Histogram");
        ui.add(
            egui::Slider::new(&mut self.selections.bin_count, MIN_BINS..=MAX_BINS).text("Bins"),
        );
        self.histogram.config.column = self.selections.summary_column.clone();
        self.histogram.config.num_bins = self.selections.bin_count;
        self.histogram.ui(table, ui);

        // Boxplot comparison
        ui.add_space(8.0);
        ui.heading("Boxplot comparison");
        ui.label("Variables to compare:");
        ui.horizontal_wrapped(|ui| {
            for name in numeric_columns {
                let mut checked = self.selections.box_columns.contains(name);
                if ui.checkbox(&mut checked, name).changed() {
                    if checked {
                        self.selections.box_columns.push(name.clone());
                    } else {
                        self.selections.box_columns.retain(|c| c != name);
                    }
                }
            }
        });
        // Keep the boxes in sheet order regardless of click order
        self.selections
            .box_columns
            .sort_by_key(|name| numeric_columns.iter().position(|c| c == name));
        self.box_plot.config.columns = self.selections.box_columns.clone();
        self.box_plot.ui(table, ui);

        // Scatter plot
        ui.add_space(8.0);
        ui.heading("Scatter plot");
        egui::ComboBox::from_label("X axis")
            .selected_text(self.selections.scatter_x.clone())
            .show_ui(ui, |ui| {
                for name in numeric_columns {
                    ui.selectable_value(&mut self.selections.scatter_x, name.clone(), name);
                }
            });
        egui::ComboBox::from_label("Y axis")
            .selected_text(self.selections.scatter_y.clone())
            .show_ui(ui, |ui| {
                for name in numeric_columns {
                    ui.selectable_value(&mut self.selections.scatter_y, name.clone(), name);
                }
            });
        self.scatter.config.x_column = self.selections.scatter_x.clone();
        self.scatter.config.y_column = self.selections.scatter_y.clone();
        self.scatter.ui(table, ui);

        ui.add_space(12.0);
        ui.label(CLOSING_REMARK);
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(egui::RichText::new(APP_TITLE).size(24.0).strong());
                ui.label(DESCRIPTION);
                ui.separator();

                self.show_page(ui);
            });
        });
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting sheet explorer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Box::new(ExplorerApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_text_sheet_fails_the_session() {
        let csv = "name,team\nAmy,red\nBen,blue\n";
        let table = SheetTable::from_reader(csv.as_bytes()).unwrap();

        let session = session_from_table(table);
        match session {
            SessionState::Failed { message } => {
                assert!(message.contains("no numeric columns"));
            }
            SessionState::Loaded { .. } => panic!("expected a failed session"),
        }
    }

    #[test]
    fn numeric_sheet_loads_with_its_numeric_columns() {
        let csv = "name,score,hours\nAmy,91,3\nBen,78,2\n";
        let table = SheetTable::from_reader(csv.as_bytes()).unwrap();

        match session_from_table(table) {
            SessionState::Loaded {
                numeric_columns, ..
            } => assert_eq!(numeric_columns, vec!["score", "hours"]),
            SessionState::Failed { message } => panic!("unexpected failure: {message}"),
        }
    }
}
