//! Tests for medi-model serialized forms.

use medi_model::{ConditionTable, DrugRecord, SearchField};

#[test]
fn drug_record_reads_workbook_keys() {
    let json = r#"{
        "Code": 7,
        "Nom Commecial": "DOLIPRANE",
        "Nom DCI": "PARACETAMOL",
        "Dosage": "500MG",
        "Conditionnement": "B/16",
        "Forme": "COMP.",
        "Tarif": 45,
        "Date Tarif": "01/01/2024"
    }"#;
    let record: DrugRecord = serde_json::from_str(json).expect("parse record");
    assert_eq!(record.code.get(), 7);
    assert_eq!(record.code.lookup_key(), "00007");
    assert_eq!(record.commercial_name, "DOLIPRANE");
    assert_eq!(record.tariff, Some(45.0));
}

#[test]
fn drug_record_tolerates_blank_cells() {
    let json = r#"{"Code": 12345, "Nom Commecial": "X", "Nom DCI": null, "Tarif": null}"#;
    let record: DrugRecord = serde_json::from_str(json).expect("parse record");
    assert_eq!(record.generic_name, "");
    assert_eq!(record.dosage, "");
    assert_eq!(record.tariff, None);
    assert_eq!(record.code.lookup_key(), "12345");
}

#[test]
fn drug_record_rejects_invalid_code() {
    let json = r#"{"Code": 0, "Nom Commecial": "X"}"#;
    assert!(serde_json::from_str::<DrugRecord>(json).is_err());
}

#[test]
fn condition_table_reads_flat_object() {
    let json = r#"{"00001": "Remboursable à 100%", "00042": "Sur ordonnance"}"#;
    let table: ConditionTable = serde_json::from_str(json).expect("parse conditions");
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("00001"), Some("Remboursable à 100%"));
}

#[test]
fn search_field_serializes_snake_case() {
    let json = serde_json::to_string(&SearchField::CommercialName).expect("serialize");
    assert_eq!(json, "\"commercial_name\"");
    assert_eq!(SearchField::default(), SearchField::GenericName);
}
