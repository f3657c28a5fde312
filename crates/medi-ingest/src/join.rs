use std::collections::HashSet;

use tracing::warn;

use medi_model::{ConditionTable, DrugRecord, EnrichedRecord};

/// Attaches each record's reimbursement condition.
///
/// Row-preserving: the output has one entry per input record, in input order,
/// whether or not a condition was found.
pub fn enrich_records(records: Vec<DrugRecord>, conditions: &ConditionTable) -> Vec<EnrichedRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .map(|record| {
            if !seen.insert(record.code) {
                warn!(code = %record.code, "duplicate drug code");
            }
            record.enrich(conditions)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use medi_model::DrugCode;

    use super::*;

    fn record(code: u64, name: &str) -> DrugRecord {
        DrugRecord {
            code: DrugCode::new(code).unwrap(),
            commercial_name: name.to_string(),
            generic_name: String::new(),
            dosage: String::new(),
            packaging: String::new(),
            form: String::new(),
            tariff: None,
            tariff_date: String::new(),
        }
    }

    #[test]
    fn join_preserves_rows_and_order() {
        let mut conditions = ConditionTable::new();
        conditions.insert("00002", "B").unwrap();
        let records = vec![record(3, "c"), record(2, "b"), record(3, "c again")];
        let enriched = enrich_records(records, &conditions);
        assert_eq!(enriched.len(), 3);
        let names: Vec<&str> = enriched
            .iter()
            .map(|r| r.record.commercial_name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "b", "c again"]);
        assert_eq!(enriched[0].condition(), None);
        assert_eq!(enriched[1].condition(), Some("B"));
    }

    #[test]
    fn five_digit_code_joins_without_padding() {
        let mut conditions = ConditionTable::new();
        conditions.insert("12345", "Wide").unwrap();
        let enriched = enrich_records(vec![record(12345, "w")], &conditions);
        assert_eq!(enriched[0].condition(), Some("Wide"));
    }
}
