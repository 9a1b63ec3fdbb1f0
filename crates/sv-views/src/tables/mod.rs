//! Data preview table

use egui::Ui;
use sv_data::SheetTable;

/// Configuration for the preview table
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub show_row_numbers: bool,
    pub resizable_columns: bool,
    pub striped_rows: bool,
    pub max_rows_displayed: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            resizable_columns: true,
            striped_rows: true,
            max_rows_displayed: 1000,
        }
    }
}

/// Read-only table rendering the loaded sheet under the page header
pub struct PreviewTable {
    pub config: PreviewConfig,
}

impl PreviewTable {
    pub fn new() -> Self {
        Self {
            config: PreviewConfig::default(),
        }
    }

    pub fn ui(&self, table: &SheetTable, ui: &mut Ui) {
        use egui_extras::{Column, TableBuilder};

        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
        let num_rows = table.num_rows().min(self.config.max_rows_displayed);
        let column_names = table.column_names();

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .resizable(self.config.resizable_columns)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true);

        if self.config.show_row_numbers {
            builder = builder.column(Column::initial(50.0).at_least(40.0));
        }
        for _ in 0..column_names.len() {
            builder = builder.column(Column::initial(100.0).at_least(60.0));
        }

        builder
            .header(20.0, |mut header| {
                if self.config.show_row_numbers {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                }
                for name in &column_names {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, num_rows, |row_index, mut row| {
                    if self.config.show_row_numbers {
                        row.col(|ui| {
                            ui.label(row_index.to_string());
                        });
                    }
                    for col_index in 0..column_names.len() {
                        row.col(|ui| {
                            ui.label(table.cell_text(row_index, col_index));
                        });
                    }
                });
            });
    }
}

impl Default for PreviewTable {
    fn default() -> Self {
        Self::new()
    }
}
