use std::fs::File;
use std::path::Path;

use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, ColumnData, Table};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – UTF-8, comma-delimited, header row required
/// * `.json`    – `[{ "diet_group": "vegan", "mean_ghgs": 2.1, ... }, ...]`
/// * `.parquet` – flat columns of strings / integers / floats
///
/// Every column is typed with [`ColumnData::infer`].
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(PipelineError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn per-column raw cells into typed columns.
fn build_table(headers: Vec<String>, cells: Vec<Vec<String>>) -> Result<Table> {
    Table::new(
        headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| Column::new(name, ColumnData::infer(raw)))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per individual.
/// Records with a different field count than the header are a parse error.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (col, value) in cells.iter_mut().zip(record.iter()) {
            col.push(value.to_string());
        }
    }

    build_table(headers, cells)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).  Column order
/// follows first appearance of each key; absent keys become blank cells.
fn load_json(path: &Path) -> Result<Table> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let records = root
        .as_array()
        .ok_or_else(|| PipelineError::InvalidData("expected top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| PipelineError::InvalidData(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let cells = headers
        .iter()
        .map(|key| {
            records
                .iter()
                .map(|rec| rec.get(key).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    build_table(headers, cells)
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
/// Nested columns are rendered to text and therefore load as `Text`.
fn load_parquet(path: &Path) -> Result<Table> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, col) in cells.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                col.push(array_value_to_string(array.as_ref(), row)?);
            }
        }
    }

    build_table(headers, cells)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_columns_are_typed() {
        let file = write_file(
            ".csv",
            "diet_group,n_participants,mean_ghgs\nvegan,12,2.5\nmeat,30,7.25\n",
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column_names(), vec!["diet_group", "n_participants", "mean_ghgs"]);
        assert!(matches!(table.column("diet_group").unwrap().data, ColumnData::Text(_)));
        assert_eq!(
            table.column("n_participants").unwrap().data,
            ColumnData::Integer(vec![12, 30])
        );
        assert_eq!(table.numeric("mean_ghgs").unwrap(), vec![2.5, 7.25]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("diet_data.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn ragged_csv_is_parse_error() {
        let file = write_file(".csv", "a,b\n1,2\n3\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(_)));
    }

    #[test]
    fn non_utf8_csv_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"a,b\n\xff\xfe,1\n").unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_file(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_keep_key_order() {
        let file = write_file(
            ".json",
            r#"[{"diet_group": "fish", "mean_land": 3.0},
                {"diet_group": "vegan", "mean_land": null}]"#,
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.column_names(), vec!["diet_group", "mean_land"]);
        let land = table.numeric("mean_land").unwrap();
        assert_eq!(land[0], 3.0);
        assert!(land[1].is_nan());
    }

    #[test]
    fn json_must_be_an_array() {
        let file = write_file(".json", r#"{"diet_group": "fish"}"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidData(_)));
    }

    #[test]
    fn csv_na_tokens_load_as_missing_numbers() {
        let file = write_file(
            ".csv",
            "diet_group,mean_bio,mean_land\nvegan,NA,\nfish,0.5,\nmeat,0.7,\n",
        );
        let table = load_file(file.path()).unwrap();

        let bio = table.numeric("mean_bio").unwrap();
        assert!(bio[0].is_nan());
        assert_eq!(&bio[1..], &[0.5, 0.7]);
        assert!(table.numeric("mean_land").unwrap().iter().all(|v| v.is_nan()));
    }
}
