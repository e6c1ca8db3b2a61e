use super::model::Table;
use crate::error::Result;
use crate::schema;

/// One axis of the parallel-coordinates chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub label: String,
    pub column: String,
    pub values: Vec<f64>,
}

impl Dimension {
    /// Compact JSON for console output: the label and the first `n` values.
    pub fn preview(&self, n: usize) -> serde_json::Value {
        serde_json::json!({
            "label": self.label,
            "values": self.values.iter().take(n).collect::<Vec<_>>(),
            "len": self.values.len(),
        })
    }
}

/// Pair each column with its display label and full value sequence.
pub fn build_dimensions<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Vec<Dimension>> {
    columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            Ok(Dimension {
                label: schema::display_label(name).to_string(),
                column: name.to_string(),
                values: table.numeric(name)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnData};
    use crate::data::normalize::environmental_columns;
    use crate::schema::*;

    #[test]
    fn one_labelled_dimension_per_indicator() {
        let table = Table::new(
            REQUIRED_COLUMNS
                .iter()
                .map(|name| {
                    let data = if is_environmental(name) {
                        ColumnData::Float(vec![0.0, 1.0])
                    } else {
                        ColumnData::Text(vec!["x".into(), "y".into()])
                    };
                    Column::new(*name, data)
                })
                .collect(),
        )
        .unwrap();

        let dims = build_dimensions(&table, &environmental_columns(&table)).unwrap();
        let labels: Vec<_> = dims.iter().map(|d| d.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["GHGs", "Land Use", "Water Scarcity", "Biodiversity", "Water Use"]
        );
        assert!(dims.iter().all(|d| d.values == vec![0.0, 1.0]));
    }

    #[test]
    fn unknown_column_uses_raw_name() {
        let table = Table::new(vec![Column::new("mean_eut", ColumnData::Float(vec![0.3]))]).unwrap();
        let dims = build_dimensions(&table, &["mean_eut"]).unwrap();
        assert_eq!(dims[0].label, "mean_eut");
    }

    #[test]
    fn preview_truncates_values() {
        let dim = Dimension {
            label: "GHGs".into(),
            column: MEAN_GHGS.into(),
            values: vec![0.0, 0.25, 0.5, 0.75, 1.0],
        };
        let preview = dim.preview(2);
        assert_eq!(preview["values"], serde_json::json!([0.0, 0.25]));
        assert_eq!(preview["len"], 5);
    }
}
