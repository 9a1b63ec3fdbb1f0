//! Wide-to-long reshaping for multi-variable comparison

use crate::sources::SheetTable;

/// One stacked observation: which variable it came from and its value.
/// Missing cells stay missing so the reshape is cell-for-cell faithful.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub variable: String,
    pub value: Option<f64>,
}

/// Stack the selected numeric columns into long form: one row per
/// (table row, variable) pair, variable-major, so the output length is
/// always `table.num_rows() * columns.len()`. Columns that are missing or
/// non-numeric are skipped.
pub fn long_form(table: &SheetTable, columns: &[String]) -> Vec<LongRow> {
    let mut stacked = Vec::new();

    for name in columns {
        let Some(values) = table.numeric_values(name) else {
            continue;
        };
        for value in values {
            stacked.push(LongRow {
                variable: name.clone(),
                value,
            });
        }
    }

    stacked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> SheetTable {
        SheetTable::from_reader(csv.as_bytes()).expect("parse failed")
    }

    #[test]
    fn length_is_rows_times_columns() {
        let t = table("a,b,c\n1,4,x\n2,5,y\n3,6,z\n");
        let cols = vec!["a".to_string(), "b".to_string()];
        let stacked = long_form(&t, &cols);
        assert_eq!(stacked.len(), t.num_rows() * cols.len());
    }

    #[test]
    fn values_match_the_original_cells() {
        let t = table("a,b\n1,4\n2,5\n3,6\n");
        let stacked = long_form(&t, &["a".to_string(), "b".to_string()]);

        let expected = [
            ("a", Some(1.0)),
            ("a", Some(2.0)),
            ("a", Some(3.0)),
            ("b", Some(4.0)),
            ("b", Some(5.0)),
            ("b", Some(6.0)),
        ];
        for (row, (var, val)) in stacked.iter().zip(expected) {
            assert_eq!(row.variable, var);
            assert_eq!(row.value, val);
        }
    }

    #[test]
    fn missing_cells_stay_missing() {
        let t = table("a\n1\n\n3\n");
        let stacked = long_form(&t, &["a".to_string()]);
        assert_eq!(stacked.len(), 3);
        assert_eq!(stacked[1].value, None);
    }

    #[test]
    fn empty_selection_yields_no_rows() {
        let t = table("a\n1\n");
        assert!(long_form(&t, &[]).is_empty());
    }
}
