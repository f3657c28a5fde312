//! Loading of the drug-record table.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use medi_model::{DrugCode, DrugRecord};

use crate::error::{IngestError, Result};
use crate::table::{CsvRows, TableFormat, cell, read_text};

/// Sheet name used by the workbook export.
pub const SHEET_NAME: &str = "Feuil1";

const CODE: &[&str] = &["Code"];
const COMMERCIAL_NAME: &[&str] = &["Nom Commecial", "Nom Commercial"];
const GENERIC_NAME: &[&str] = &["Nom DCI", "DCI"];
const DOSAGE: &[&str] = &["Dosage"];
const PACKAGING: &[&str] = &["Conditionnement"];
const FORM: &[&str] = &["Forme"];
const TARIFF: &[&str] = &["Tarif"];
const TARIFF_DATE: &[&str] = &["Date Tarif"];

/// Loads a drug table, choosing the reader from the file extension.
pub fn load_drug_table(path: &Path) -> Result<Vec<DrugRecord>> {
    let records = match TableFormat::from_path(path)? {
        TableFormat::Json => parse_drug_json(&read_text(path)?, path)?,
        TableFormat::Csv => read_drug_csv(path)?,
    };
    debug!(path = %path.display(), records = records.len(), "drug table loaded");
    Ok(records)
}

/// Parses the JSON export: either `{"Feuil1": [...]}` or a bare array of rows.
///
/// `origin` only labels errors.
pub fn parse_drug_json(text: &str, origin: &Path) -> Result<Vec<DrugRecord>> {
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut sheets) => {
            let sheet = match sheets.remove(SHEET_NAME) {
                Some(sheet) => sheet,
                None if sheets.len() == 1 => {
                    let (name, sheet) = sheets.into_iter().next().ok_or_else(|| {
                        IngestError::MissingSheet {
                            path: origin.to_path_buf(),
                            sheet: SHEET_NAME,
                        }
                    })?;
                    warn!(sheet = %name, expected = SHEET_NAME, "sheet not found, using the only sheet");
                    sheet
                }
                None => {
                    return Err(IngestError::MissingSheet {
                        path: origin.to_path_buf(),
                        sheet: SHEET_NAME,
                    });
                }
            };
            match sheet {
                Value::Array(rows) => rows,
                _ => {
                    return Err(IngestError::MissingSheet {
                        path: origin.to_path_buf(),
                        sheet: SHEET_NAME,
                    });
                }
            }
        }
        _ => {
            return Err(IngestError::MissingSheet {
                path: origin.to_path_buf(),
                sheet: SHEET_NAME,
            });
        }
    };
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            serde_json::from_value(row).map_err(|source| IngestError::InvalidRow {
                path: origin.to_path_buf(),
                row: idx + 1,
                message: source.to_string(),
            })
        })
        .collect()
}

/// Reads a CSV drug table with a header row.
pub fn read_drug_csv(path: &Path) -> Result<Vec<DrugRecord>> {
    let table = CsvRows::read(path)?;
    let code_idx = table.require(CODE)?;
    let commercial_idx = table.require(COMMERCIAL_NAME)?;
    let generic_idx = table.require(GENERIC_NAME)?;
    let dosage_idx = table.column(DOSAGE);
    let packaging_idx = table.column(PACKAGING);
    let form_idx = table.column(FORM);
    let tariff_idx = table.column(TARIFF);
    let tariff_date_idx = table.column(TARIFF_DATE);

    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let row_number = idx + 1;
        let code = parse_code(cell(row, Some(code_idx)), &table.path, row_number)?;
        let tariff = parse_tariff(cell(row, tariff_idx), &table.path, row_number)?;
        records.push(DrugRecord {
            code,
            commercial_name: cell(row, Some(commercial_idx)).to_string(),
            generic_name: cell(row, Some(generic_idx)).to_string(),
            dosage: cell(row, dosage_idx).to_string(),
            packaging: cell(row, packaging_idx).to_string(),
            form: cell(row, form_idx).to_string(),
            tariff,
            tariff_date: cell(row, tariff_date_idx).to_string(),
        });
    }
    Ok(records)
}

fn parse_code(raw: &str, path: &Path, row: usize) -> Result<DrugCode> {
    let value: u64 = raw.parse().map_err(|_| IngestError::InvalidRow {
        path: path.to_path_buf(),
        row,
        message: format!("invalid code {raw:?}"),
    })?;
    DrugCode::new(value).map_err(|source| IngestError::InvalidValue {
        path: path.to_path_buf(),
        row,
        source,
    })
}

/// Blank cells are an absent tariff; decimal commas are accepted.
fn parse_tariff(raw: &str, path: &Path, row: usize) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let normalized = raw.replace(' ', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .map(Some)
        .map_err(|_| IngestError::InvalidRow {
            path: path.to_path_buf(),
            row,
            message: format!("invalid tariff {raw:?}"),
        })
}
