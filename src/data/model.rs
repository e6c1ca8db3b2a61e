use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// ColumnData – the typed values of one column
// ---------------------------------------------------------------------------

/// Cell spellings read as a missing value, matching the pandas CSV defaults.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Column storage mirroring the three dtypes the dataset needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<String>),
    Integer(Vec<i64>),
    /// Missing cells are `NaN`.
    Float(Vec<f64>),
}

impl ColumnData {
    /// Infer the narrowest type every present cell parses as.
    ///
    /// Blank cells and the [`NA_TOKENS`] count as missing.
    ///
    /// * all cells `i64`                      → `Integer`
    /// * all cells `f64` (or `i64` + missing) → `Float`, missing becomes `NaN`
    /// * only missing cells                   → `Float`, all `NaN`
    /// * anything else                        → `Text`
    pub fn infer(cells: Vec<String>) -> Self {
        let mut all_int = true;
        let mut all_float = true;
        let mut has_blank = false;
        let mut has_value = false;

        for cell in &cells {
            let cell = cell.trim();
            if is_missing(cell) {
                has_blank = true;
                continue;
            }
            has_value = true;
            if all_int && cell.parse::<i64>().is_err() {
                all_int = false;
            }
            if cell.parse::<f64>().is_err() {
                all_float = false;
                break;
            }
        }

        if !all_float {
            return ColumnData::Text(cells);
        }
        if !has_value {
            return ColumnData::Float(vec![f64::NAN; cells.len()]);
        }
        if all_int && !has_blank {
            let ints = cells
                .iter()
                .filter_map(|c| c.trim().parse::<i64>().ok())
                .collect();
            return ColumnData::Integer(ints);
        }
        ColumnData::Float(
            cells
                .iter()
                .map(|c| {
                    let c = c.trim();
                    if is_missing(c) {
                        f64::NAN
                    } else {
                        c.parse::<f64>().unwrap_or(f64::NAN)
                    }
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
        }
    }

    /// Numeric view of the column; `None` for text.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnData::Text(_) => None,
            ColumnData::Integer(v) => Some(v.iter().map(|&i| i as f64).collect()),
            ColumnData::Float(v) => Some(v.clone()),
        }
    }

    /// Every cell rendered as text (numbers use their shortest form).
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            ColumnData::Text(v) => v.clone(),
            ColumnData::Integer(v) => v.iter().map(|i| i.to_string()).collect(),
            ColumnData::Float(v) => v.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn head(&self, n: usize) -> ColumnData {
        match self {
            ColumnData::Text(v) => ColumnData::Text(v.iter().take(n).cloned().collect()),
            ColumnData::Integer(v) => ColumnData::Integer(v.iter().take(n).copied().collect()),
            ColumnData::Float(v) => ColumnData::Float(v.iter().take(n).copied().collect()),
        }
    }

    fn to_arrow(&self) -> (DataType, ArrayRef) {
        match self {
            ColumnData::Text(v) => (
                DataType::Utf8,
                Arc::new(StringArray::from_iter_values(v.iter())),
            ),
            ColumnData::Integer(v) => (
                DataType::Int64,
                Arc::new(Int64Array::from(v.clone())),
            ),
            ColumnData::Float(v) => (
                DataType::Float64,
                Arc::new(Float64Array::from(v.clone())),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// An in-memory columnar table; every column has `num_rows` values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    /// Build a table, checking that all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, |c| c.data.len());
        for col in &columns {
            if col.data.len() != num_rows {
                return Err(PipelineError::LengthMismatch {
                    column: col.name.clone(),
                    expected: num_rows,
                    found: col.data.len(),
                });
            }
        }
        Ok(Self { columns, num_rows })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Table::column`], but a missing column is a schema error.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| PipelineError::MissingColumns(vec![name.to_string()]))
    }

    /// Values of a numeric column as `f64`.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        self.require(name)?
            .data
            .to_f64()
            .ok_or_else(|| PipelineError::NotNumeric {
                column: name.to_string(),
            })
    }

    /// Values of any column as text.
    pub fn text(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.require(name)?.data.to_strings())
    }

    /// Replace the data of an existing column, keeping its position.
    pub fn replace_column(&mut self, name: &str, data: ColumnData) -> Result<()> {
        self.check_len(name, &data)?;
        let col = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| PipelineError::MissingColumns(vec![name.to_string()]))?;
        col.data = data;
        Ok(())
    }

    /// Append a column, or overwrite it in place if the name already exists.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        self.check_len(&column.name, &column.data)?;
        if self.columns.is_empty() {
            self.num_rows = column.data.len();
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => existing.data = column.data,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// A new table holding the named columns, in the given order.
    pub fn project(&self, names: &[&str]) -> Result<Table> {
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.column(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::MissingColumns(missing));
        }
        let columns = names
            .iter()
            .filter_map(|n| self.column(n).cloned())
            .collect();
        Table::new(columns)
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.data.head(n)))
                .collect(),
            num_rows: self.num_rows.min(n),
        }
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = self
            .columns
            .iter()
            .map(|c| {
                let (dtype, array) = c.data.to_arrow();
                (Field::new(&c.name, dtype, false), array)
            })
            .unzip();
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }

    fn check_len(&self, name: &str, data: &ColumnData) -> Result<()> {
        if !self.columns.is_empty() && data.len() != self.num_rows {
            return Err(PipelineError::LengthMismatch {
                column: name.to_string(),
                expected: self.num_rows,
                found: data.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "<empty table>");
        }
        let batch = self.to_record_batch().map_err(|_| fmt::Error)?;
        let pretty = pretty_format_batches(&[batch]).map_err(|_| fmt::Error)?;
        write!(f, "{pretty}")?;
        write!(f, "\n[{} rows x {} columns]", self.num_rows, self.columns.len())
    }
}
