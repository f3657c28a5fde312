//! Linear substring filter over the enriched record set.

use medi_model::{EnrichedRecord, SearchField};

/// Whether `query` counts as "no search yet".
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Case-insensitive substring test of `query` against one field of `record`.
pub fn matches(record: &EnrichedRecord, field: SearchField, query: &str) -> bool {
    record
        .field_value(field)
        .contains_lowercase(&query.to_lowercase())
}

/// Positions of the records whose `field` contains `query`, in dataset order.
///
/// A blank query yields no positions rather than every record.
pub fn filter_records(records: &[EnrichedRecord], field: SearchField, query: &str) -> Vec<usize> {
    if is_blank(query) {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.field_value(field).contains_lowercase(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use medi_model::{DrugCode, DrugRecord};

    use super::*;

    fn record(code: u64, commercial: &str, generic: &str) -> EnrichedRecord {
        EnrichedRecord {
            record: DrugRecord {
                code: DrugCode::new(code).unwrap(),
                commercial_name: commercial.to_string(),
                generic_name: generic.to_string(),
                dosage: String::new(),
                packaging: String::new(),
                form: String::new(),
                tariff: None,
                tariff_date: String::new(),
            },
            condition: None,
        }
    }

    #[test]
    fn blank_query_matches_nothing() {
        let records = vec![record(1, "Doliprane", "Paracetamol")];
        assert!(filter_records(&records, SearchField::CommercialName, "").is_empty());
        assert!(filter_records(&records, SearchField::CommercialName, " \t ").is_empty());
    }

    #[test]
    fn keeps_dataset_order() {
        let records = vec![
            record(1, "Paralgan", "Paracetamol"),
            record(2, "Amlor", "Amlodipine"),
            record(3, "Doliprane", "Paracetamol"),
        ];
        assert_eq!(
            filter_records(&records, SearchField::GenericName, "PARA"),
            vec![0, 2]
        );
    }

    #[test]
    fn query_whitespace_is_significant_inside() {
        let records = vec![record(1, "Kardegic", "Acetylsalicylate de lysine")];
        assert_eq!(
            filter_records(&records, SearchField::GenericName, "de lys"),
            vec![0]
        );
        assert!(filter_records(&records, SearchField::GenericName, "delys").is_empty());
    }

    #[test]
    fn code_field_matches_decimal_digits() {
        let records = vec![record(7, "A", "B"), record(1877, "C", "D")];
        assert_eq!(filter_records(&records, SearchField::Code, "7"), vec![0, 1]);
        assert_eq!(filter_records(&records, SearchField::Code, "187"), vec![1]);
    }

    #[test]
    fn absent_tariff_never_matches() {
        let records = vec![record(1, "A", "B")];
        assert!(filter_records(&records, SearchField::Tariff, "1").is_empty());
        assert!(!matches(&records[0], SearchField::Tariff, "0"));
    }
}
