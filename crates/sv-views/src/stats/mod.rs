//! Summary statistics view for one selected column

use egui::Ui;
use sv_data::SheetTable;

use crate::plots::utils::stats::{calculate_quartiles, mean, sample_std};

/// Descriptive statistics for one numeric column, in display order.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Compute the eight summary statistics over the non-missing values.
    /// Degenerate cases (n < 2) produce NaN, shown verbatim.
    pub fn compute(values: &[f64]) -> Self {
        let (q1, median, q3) = calculate_quartiles(values);

        Self {
            count: values.len(),
            mean: mean(values),
            std_dev: sample_std(values),
            min: values.iter().copied().fold(f64::NAN, f64::min),
            q1,
            median,
            q3,
            max: values.iter().copied().fold(f64::NAN, f64::max),
        }
    }
}

/// Summary statistics view
pub struct SummaryStatsView;

impl SummaryStatsView {
    pub fn ui(ui: &mut Ui, table: &SheetTable, column: &str) {
        let values: Vec<f64> = table
            .numeric_values(column)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        let summary = ColumnSummary::compute(&values);

        use egui_extras::{Column, TableBuilder};

        let rows: [(&str, String); 8] = [
            ("count", summary.count.to_string()),
            ("mean", format!("{:.4}", summary.mean)),
            ("std", format!("{:.4}", summary.std_dev)),
            ("min", format!("{:.4}", summary.min)),
            ("25%", format!("{:.4}", summary.q1)),
            ("50%", format!("{:.4}", summary.median)),
            ("75%", format!("{:.4}", summary.q3)),
            ("max", format!("{:.4}", summary.max)),
        ];

        ui.push_id(("summary_stats", column), |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(100.0).at_least(60.0))
                .column(Column::initial(120.0).at_least(80.0))
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Statistic");
                    });
                    header.col(|ui| {
                        ui.strong(column);
                    });
                })
                .body(|mut body| {
                    for (name, value) in rows {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(name);
                            });
                            row.col(|ui| {
                                ui.label(value);
                            });
                        });
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_four_scores() {
        let s = ColumnSummary::compute(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean - 25.0).abs() < 1e-9);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 40.0);
        assert!((s.q1 - 17.5).abs() < 1e-9);
        assert!((s.median - 25.0).abs() < 1e-9);
        assert!((s.q3 - 32.5).abs() < 1e-9);
        assert!((s.std_dev - (500.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn single_value_has_nan_std() {
        let s = ColumnSummary::compute(&[5.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.min, 5.0);
        assert_eq!(s.max, 5.0);
        assert!(s.std_dev.is_nan());
    }

    #[test]
    fn nan_cell_in_sheet_summarizes_remaining_values() {
        // A "NaN" cell is a missing value; the summary covers what's left
        let csv = "x\n1\nNaN\n2\n";
        let table = SheetTable::from_reader(csv.as_bytes()).unwrap();
        let values: Vec<f64> = table
            .numeric_values("x")
            .unwrap()
            .into_iter()
            .flatten()
            .collect();

        let s = ColumnSummary::compute(&values);
        assert_eq!(s.count, 2);
        assert!((s.mean - 1.5).abs() < 1e-9);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 2.0);
    }

    #[test]
    fn empty_column_degenerates_to_nan() {
        let s = ColumnSummary::compute(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
        assert!(s.max.is_nan());
    }
}
