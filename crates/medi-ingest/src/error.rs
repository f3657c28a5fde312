use std::path::PathBuf;

use thiserror::Error;

use medi_model::ModelError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse json {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("parse csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: row {row}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },
    #[error("{path}: row {row}: {source}")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        #[source]
        source: ModelError,
    },
    #[error("{path}: missing column {column:?}")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{path}: expected a \"{sheet}\" sheet or an array of rows")]
    MissingSheet { path: PathBuf, sheet: &'static str },
    #[error("{path}: duplicate condition for key {key}")]
    DuplicateCondition { path: PathBuf, key: String },
    #[error("{path}: unsupported table format (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
