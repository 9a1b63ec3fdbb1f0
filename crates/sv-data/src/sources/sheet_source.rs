//! In-memory table loaded from a published spreadsheet

use std::io::Read;
use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use tracing::info;

use crate::sheet_url::export_url;
use crate::DataError;

/// A spreadsheet loaded once into memory as typed columns.
///
/// Column types are inferred at load time (Int64, Float64 or Utf8) and act
/// as immutable metadata afterwards; the table itself is read-only.
pub struct SheetTable {
    schema: Arc<Schema>,
    batch: RecordBatch,
}

impl SheetTable {
    /// Fetch a share link and parse the exported CSV into a table.
    ///
    /// The URL is normalized with [`export_url`] first; any transport error
    /// or non-success status is reported as a [`DataError`].
    pub fn fetch(url: &str) -> Result<Self, DataError> {
        let csv_url = export_url(url);
        info!("Fetching sheet from {}", csv_url);

        let client = reqwest::blocking::Client::new();
        let response = client.get(&csv_url).send()?;
        if !response.status().is_success() {
            return Err(DataError::Http(response.status().as_u16()));
        }

        let body = response.text()?;
        Self::from_reader(body.as_bytes())
    }

    /// Parse headered CSV into a table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() {
            return Err(DataError::Csv("sheet has no header row".to_string()));
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        // Detect column types over the whole table
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let data_type = Self::detect_column_type(&rows, idx);
                Field::new(name, data_type, true)
            })
            .collect::<Vec<_>>();

        let schema = Arc::new(Schema::new(fields));
        let batch = Self::build_batch(schema.clone(), &rows)?;

        info!(
            "Parsed sheet: {} rows x {} columns",
            batch.num_rows(),
            batch.num_columns()
        );

        Ok(Self { schema, batch })
    }

    /// Detect a column's type: integer if every non-empty cell parses as
    /// i64, float if every non-empty cell parses as f64, string otherwise.
    fn detect_column_type(rows: &[Vec<String>], col_idx: usize) -> DataType {
        let mut is_int = true;
        let mut is_float = true;

        for row in rows {
            if let Some(value) = row.get(col_idx) {
                if value.is_empty() {
                    continue;
                }

                // A cell like "NaN" or "inf" is a missing value, not type
                // evidence, but it does make an integer column fractional
                if matches!(value.parse::<f64>(), Ok(v) if !v.is_finite()) {
                    is_int = false;
                    continue;
                }

                if is_int && value.parse::<i64>().is_err() {
                    is_int = false;
                }

                if is_float && value.parse::<f64>().is_err() {
                    is_float = false;
                }
            }
        }

        if is_int {
            DataType::Int64
        } else if is_float {
            DataType::Float64
        } else {
            DataType::Utf8
        }
    }

    /// Build arrow arrays for each column; empty cells become nulls.
    fn build_batch(schema: Arc<Schema>, rows: &[Vec<String>]) -> Result<RecordBatch, DataError> {
        let mut columns: Vec<ArrayRef> = Vec::new();

        for (col_idx, field) in schema.fields().iter().enumerate() {
            let array: ArrayRef = match field.data_type() {
                DataType::Int64 => {
                    let mut builder = Int64Builder::new();
                    for row in rows {
                        match row.get(col_idx) {
                            Some(value) if !value.is_empty() => match value.parse::<i64>() {
                                Ok(v) => builder.append_value(v),
                                Err(_) => builder.append_null(),
                            },
                            _ => builder.append_null(),
                        }
                    }
                    Arc::new(builder.finish())
                }
                DataType::Float64 => {
                    let mut builder = Float64Builder::new();
                    for row in rows {
                        match row.get(col_idx) {
                            Some(value) if !value.is_empty() => match value.parse::<f64>() {
                                Ok(v) if v.is_finite() => builder.append_value(v),
                                _ => builder.append_null(),
                            },
                            _ => builder.append_null(),
                        }
                    }
                    Arc::new(builder.finish())
                }
                _ => {
                    let mut builder = StringBuilder::new();
                    for row in rows {
                        match row.get(col_idx) {
                            Some(value) if !value.is_empty() => builder.append_value(value),
                            _ => builder.append_null(),
                        }
                    }
                    Arc::new(builder.finish())
                }
            };

            columns.push(array);
        }

        RecordBatch::try_new(schema, columns).map_err(|e| e.into())
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// All column names in sheet order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Names of numeric (Int64/Float64) columns, preserving sheet order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .filter(|f| matches!(f.data_type(), DataType::Int64 | DataType::Float64))
            .map(|f| f.name().clone())
            .collect()
    }

    /// A numeric column's values aligned with the table rows, or None if the
    /// column is missing or non-numeric.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let column = self.batch.column_by_name(name)?;

        if let Some(int_array) = column.as_any().downcast_ref::<Int64Array>() {
            Some(
                (0..int_array.len())
                    .map(|i| {
                        if int_array.is_null(i) {
                            None
                        } else {
                            Some(int_array.value(i) as f64)
                        }
                    })
                    .collect(),
            )
        } else if let Some(float_array) = column.as_any().downcast_ref::<Float64Array>() {
            Some(
                (0..float_array.len())
                    .map(|i| {
                        if float_array.is_null(i) {
                            None
                        } else {
                            Some(float_array.value(i))
                        }
                    })
                    .collect(),
            )
        } else {
            None
        }
    }

    /// Render one cell as display text; nulls come out empty.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        if row >= self.batch.num_rows() || col >= self.batch.num_columns() {
            return String::new();
        }
        arrow::util::display::array_value_to_string(self.batch.column(col), row)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> SheetTable {
        SheetTable::from_reader(csv.as_bytes()).expect("parse failed")
    }

    #[test]
    fn classifies_mixed_columns() {
        let t = table("name,score\nAmy,10\nBen,20\nCho,30\nDee,40\n");
        assert_eq!(t.num_rows(), 4);
        assert_eq!(t.column_names(), vec!["name", "score"]);
        assert_eq!(t.numeric_columns(), vec!["score"]);
    }

    #[test]
    fn integer_column_with_decimals_becomes_float() {
        let t = table("x\n1\n2.5\n3\n");
        assert_eq!(t.schema().field(0).data_type(), &DataType::Float64);
        assert_eq!(t.numeric_columns(), vec!["x"]);
    }

    #[test]
    fn almost_numeric_column_is_not_numeric() {
        let t = table("x\n1\n2\nn/a\n");
        assert_eq!(t.schema().field(0).data_type(), &DataType::Utf8);
        assert!(t.numeric_columns().is_empty());
    }

    #[test]
    fn nan_cells_are_missing_values() {
        let t = table("x\n1\nNaN\n2\n");
        assert_eq!(t.schema().field(0).data_type(), &DataType::Float64);
        assert_eq!(t.numeric_columns(), vec!["x"]);
        assert_eq!(
            t.numeric_values("x").unwrap(),
            vec![Some(1.0), None, Some(2.0)]
        );
    }

    #[test]
    fn infinite_cells_are_missing_values() {
        let t = table("x\n1.5\ninf\n-inf\n");
        assert_eq!(
            t.numeric_values("x").unwrap(),
            vec![Some(1.5), None, None]
        );
    }

    #[test]
    fn empty_cells_are_nulls_not_type_breakers() {
        let t = table("x\n1\n\n3\n");
        assert_eq!(t.numeric_columns(), vec!["x"]);
        assert_eq!(
            t.numeric_values("x").unwrap(),
            vec![Some(1.0), None, Some(3.0)]
        );
    }

    #[test]
    fn numeric_values_for_text_column_is_none() {
        let t = table("name,score\nAmy,10\n");
        assert!(t.numeric_values("name").is_none());
        assert!(t.numeric_values("missing").is_none());
    }

    #[test]
    fn column_order_is_preserved() {
        let t = table("b,label,a\n2,x,1\n4,y,3\n");
        assert_eq!(t.numeric_columns(), vec!["b", "a"]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(SheetTable::from_reader("".as_bytes()).is_err());
    }

    #[test]
    fn ragged_rows_are_an_error() {
        assert!(SheetTable::from_reader("a,b\n1\n".as_bytes()).is_err());
    }

    #[test]
    fn cell_text_renders_values_and_nulls() {
        let t = table("name,score\nAmy,10\nBen,\n");
        assert_eq!(t.cell_text(0, 0), "Amy");
        assert_eq!(t.cell_text(0, 1), "10");
        assert_eq!(t.cell_text(1, 1), "");
    }
}
