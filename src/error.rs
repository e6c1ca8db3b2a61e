use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the load → select → normalize → encode stages.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Column '{column}' is not numeric")]
    NotNumeric { column: String },

    #[error("Column '{column}' contains infinite values")]
    NonFinite { column: String },

    #[error("Scaler used before fit")]
    NotFitted,

    #[error("Value '{0}' has no category code")]
    UnknownCategory(String),

    #[error("Code {0} has no category label")]
    UnknownCode(i64),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("InvalidData: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
