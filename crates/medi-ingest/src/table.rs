//! Shared plumbing for reading the static tables from disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// On-disk encoding of a table, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// A CSV file read fully into memory with normalized headers.
#[derive(Debug, Clone)]
pub(crate) struct CsvRows {
    pub path: PathBuf,
    headers: HashMap<String, usize>,
    pub rows: Vec<Vec<String>>,
}

impl CsvRows {
    pub fn read(path: &Path) -> Result<Self> {
        let csv_error = |source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(csv_error)?;
        let mut headers = HashMap::new();
        for (idx, header) in reader.headers().map_err(csv_error)?.iter().enumerate() {
            headers
                .entry(normalize_header(header).to_lowercase())
                .or_insert(idx);
        }
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let row: Vec<String> = record.iter().map(normalize_cell).collect();
            if row.iter().all(String::is_empty) {
                continue;
            }
            rows.push(row);
        }
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Index of the first column matching any of `names`, case-insensitively.
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.headers.get(&name.to_lowercase()).copied())
    }

    pub fn require(&self, names: &[&'static str]) -> Result<usize> {
        self.column(names).ok_or_else(|| IngestError::MissingColumn {
            path: self.path.clone(),
            column: names[0],
        })
    }
}

/// Cell accessor that tolerates short rows.
pub(crate) fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}
