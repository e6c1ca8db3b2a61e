//! Min-max scaling of the environmental indicator columns.

use serde::Serialize;

use super::model::{ColumnData, Table};
use crate::error::{PipelineError, Result};
use crate::schema;

/// Names of the environmental mean columns, in table order.
pub fn environmental_columns(table: &Table) -> Vec<String> {
    table
        .column_names()
        .into_iter()
        .filter(|name| schema::is_environmental(name))
        .map(str::to_string)
        .collect()
}

/// Observed range of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Range over the finite values; `None` if there are none.
    /// Infinite values are rejected by [`MinMaxScaler::fit`] before this runs.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(ColumnRange { min: v, max: v }),
                Some(r) => Some(ColumnRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }

    /// `(v - min) / (max - min)`; a constant column maps to 0.0, `NaN` stays `NaN`.
    pub fn scale(&self, v: f64) -> f64 {
        if v.is_nan() {
            f64::NAN
        } else if self.is_constant() {
            0.0
        } else {
            (v - self.min) / (self.max - self.min)
        }
    }
}

/// Per-column min-max scaler, fitted once and applied uniformly.
pub struct MinMaxScaler {
    ranges: Vec<(String, Option<ColumnRange>)>,
    is_fitted: bool,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            ranges: Vec::new(),
            is_fitted: false,
        }
    }

    pub fn fit<S: AsRef<str>>(&mut self, table: &Table, columns: &[S]) -> Result<()> {
        let mut ranges = Vec::with_capacity(columns.len());
        for name in columns {
            let name = name.as_ref();
            let values = table.numeric(name)?;
            if values.iter().any(|v| v.is_infinite()) {
                return Err(PipelineError::NonFinite {
                    column: name.to_string(),
                });
            }
            let range = ColumnRange::from_values(&values);
            match range {
                Some(r) if r.is_constant() => {
                    log::warn!("Column '{name}' is constant ({}); scaling it to 0.0", r.min)
                }
                Some(r) => log::debug!("Column '{name}' range [{}, {}]", r.min, r.max),
                None => log::warn!("Column '{name}' has no finite values; leaving it as NaN"),
            }
            ranges.push((name.to_string(), range));
        }
        self.ranges = ranges;
        self.is_fitted = true;
        Ok(())
    }

    /// Replace every fitted column of `table` with its scaled values.
    pub fn transform(&self, table: &mut Table) -> Result<()> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted);
        }
        for (name, range) in &self.ranges {
            let values = table.numeric(name)?;
            let scaled = match range {
                Some(r) => values.iter().map(|&v| r.scale(v)).collect(),
                None => vec![f64::NAN; values.len()],
            };
            table.replace_column(name, ColumnData::Float(scaled))?;
        }
        Ok(())
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, table: &mut Table, columns: &[S]) -> Result<()> {
        self.fit(table, columns)?;
        self.transform(table)
    }

    /// Fitted `(column, range)` pairs, in fit order.
    pub fn ranges(&self) -> &[(String, Option<ColumnRange>)] {
        &self.ranges
    }
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;
    use crate::schema::*;

    fn env_table(ghgs: Vec<f64>) -> Table {
        let n = ghgs.len();
        Table::new(vec![
            Column::new(DIET_GROUP, ColumnData::Text(vec!["vegan".into(); n])),
            Column::new(MEAN_GHGS, ColumnData::Float(ghgs)),
            Column::new(MEAN_LAND, ColumnData::Float(vec![4.0; n])),
            Column::new(MEAN_WATSCAR, ColumnData::Integer(vec![7; n])),
            Column::new(MEAN_BIO, ColumnData::Float(vec![0.5; n])),
            Column::new(MEAN_WATUSE, ColumnData::Float(vec![-1.0; n])),
        ])
        .unwrap()
    }

    #[test]
    fn finds_environmental_columns_in_order() {
        let table = env_table(vec![1.0]);
        assert_eq!(
            environmental_columns(&table),
            vec![MEAN_GHGS, MEAN_LAND, MEAN_WATSCAR, MEAN_BIO, MEAN_WATUSE]
        );
    }

    #[test]
    fn scales_to_unit_interval_and_constant_columns_to_zero() {
        let mut table = env_table(vec![0.0, 5.0, 10.0]);
        let columns = environmental_columns(&table);
        MinMaxScaler::new().fit_transform(&mut table, &columns).unwrap();

        assert_eq!(table.numeric(MEAN_GHGS).unwrap(), vec![0.0, 0.5, 1.0]);
        for name in [MEAN_LAND, MEAN_WATSCAR, MEAN_BIO, MEAN_WATUSE] {
            assert_eq!(table.numeric(name).unwrap(), vec![0.0, 0.0, 0.0], "{name}");
        }
    }

    #[test]
    fn min_maps_to_zero_and_max_to_one() {
        let raw = vec![3.7, -2.25, 18.0, 0.0, 9.5, 18.0, 4.4];
        let mut table = env_table(raw.clone());
        let mut scaler = MinMaxScaler::new();
        scaler.fit_transform(&mut table, &[MEAN_GHGS]).unwrap();

        let scaled = table.numeric(MEAN_GHGS).unwrap();
        assert!(scaled.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(scaled[1], 0.0);
        assert_eq!(scaled[2], 1.0);
        assert_eq!(scaled[5], 1.0);
        assert_eq!(
            scaler.ranges()[0].1,
            Some(ColumnRange { min: -2.25, max: 18.0 })
        );
    }

    #[test]
    fn missing_values_are_ignored_and_kept() {
        let mut table = env_table(vec![2.0, f64::NAN, 4.0]);
        MinMaxScaler::new().fit_transform(&mut table, &[MEAN_GHGS]).unwrap();

        let scaled = table.numeric(MEAN_GHGS).unwrap();
        assert_eq!(scaled[0], 0.0);
        assert!(scaled[1].is_nan());
        assert_eq!(scaled[2], 1.0);
    }

    #[test]
    fn integer_columns_become_float() {
        let mut table = env_table(vec![1.0, 2.0]);
        MinMaxScaler::new().fit_transform(&mut table, &[MEAN_WATSCAR]).unwrap();
        assert!(matches!(
            table.column(MEAN_WATSCAR).unwrap().data,
            ColumnData::Float(_)
        ));
    }

    #[test]
    fn text_column_is_rejected() {
        let mut table = env_table(vec![1.0]);
        let err = MinMaxScaler::new()
            .fit_transform(&mut table, &[DIET_GROUP])
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotNumeric { .. }));
    }

    #[test]
    fn infinite_values_are_rejected() {
        let mut table = env_table(vec![0.0, 5.0, f64::INFINITY]);
        let err = MinMaxScaler::new()
            .fit_transform(&mut table, &[MEAN_GHGS])
            .unwrap_err();
        assert!(matches!(err, PipelineError::NonFinite { column } if column == MEAN_GHGS));
        assert_eq!(table.numeric(MEAN_GHGS).unwrap()[2], f64::INFINITY);
    }

    #[test]
    fn transform_requires_fit() {
        let mut table = env_table(vec![1.0]);
        let err = MinMaxScaler::new().transform(&mut table).unwrap_err();
        assert!(matches!(err, PipelineError::NotFitted));
    }
}
