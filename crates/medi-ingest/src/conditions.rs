//! Loading of the reimbursement-condition lookup table.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use medi_model::ConditionTable;

use crate::error::{IngestError, Result};
use crate::table::{CsvRows, TableFormat, cell, read_text};

const KEY: &[&str] = &["code", "key"];
const CONDITION: &[&str] = &["condition", "conditions", "condition de remboursement"];

pub fn load_condition_table(path: &Path) -> Result<ConditionTable> {
    let table = match TableFormat::from_path(path)? {
        TableFormat::Json => parse_condition_json(&read_text(path)?, path)?,
        TableFormat::Csv => read_condition_csv(path)?,
    };
    debug!(path = %path.display(), conditions = table.len(), "condition table loaded");
    Ok(table)
}

/// Parses a flat `{"00001": "text"}` object.
///
/// `null` values and keys that are not drug codes are skipped, so the drugs
/// they would describe show no condition. Keys are normalized so `"7"` and
/// `"00007"` collide, which is reported as a duplicate.
pub fn parse_condition_json(text: &str, origin: &Path) -> Result<ConditionTable> {
    let raw: BTreeMap<String, Option<String>> =
        serde_json::from_str(text).map_err(|source| IngestError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
    let mut table = ConditionTable::new();
    for (row, (key, condition)) in raw.into_iter().enumerate() {
        insert(&mut table, &key, condition, origin, row + 1)?;
    }
    Ok(table)
}

/// Reads a two-column `code,condition` CSV. Empty condition cells are absent.
pub fn read_condition_csv(path: &Path) -> Result<ConditionTable> {
    let rows = CsvRows::read(path)?;
    let key_idx = rows.require(KEY)?;
    let condition_idx = rows.require(CONDITION)?;
    let mut table = ConditionTable::new();
    for (idx, row) in rows.rows.iter().enumerate() {
        let condition = Some(cell(row, Some(condition_idx)))
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        insert(
            &mut table,
            cell(row, Some(key_idx)),
            condition,
            path,
            idx + 1,
        )?;
    }
    Ok(table)
}

fn insert(
    table: &mut ConditionTable,
    key: &str,
    condition: Option<String>,
    path: &Path,
    row: usize,
) -> Result<()> {
    let Some(condition) = condition else {
        debug!(path = %path.display(), row, key, "condition without text skipped");
        return Ok(());
    };
    let previous = match table.insert(key, condition) {
        Ok(previous) => previous,
        Err(error) => {
            warn!(path = %path.display(), row, %error, "condition entry skipped");
            return Ok(());
        }
    };
    if previous.is_some() {
        return Err(IngestError::DuplicateCondition {
            path: path.to_path_buf(),
            key: key.to_string(),
        });
    }
    Ok(())
}
