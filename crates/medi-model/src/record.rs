use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ConditionTable, DrugCode, ModelError};

/// One row of the reimbursed-drug table, as exported from the workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    #[serde(rename = "Code")]
    pub code: DrugCode,
    // The export misspells this column; the key is kept as shipped.
    #[serde(rename = "Nom Commecial", default, deserialize_with = "nullable_string")]
    pub commercial_name: String,
    #[serde(rename = "Nom DCI", default, deserialize_with = "nullable_string")]
    pub generic_name: String,
    #[serde(rename = "Dosage", default, deserialize_with = "nullable_string")]
    pub dosage: String,
    #[serde(rename = "Conditionnement", default, deserialize_with = "nullable_string")]
    pub packaging: String,
    #[serde(rename = "Forme", default, deserialize_with = "nullable_string")]
    pub form: String,
    #[serde(rename = "Tarif", default)]
    pub tariff: Option<f64>,
    #[serde(rename = "Date Tarif", default, deserialize_with = "nullable_string")]
    pub tariff_date: String,
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl DrugRecord {
    pub fn field_value(&self, field: SearchField) -> FieldValue<'_> {
        match field {
            SearchField::CommercialName => FieldValue::Text(&self.commercial_name),
            SearchField::GenericName => FieldValue::Text(&self.generic_name),
            SearchField::Code => FieldValue::Integer(u64::from(self.code.get())),
            SearchField::Tariff => match self.tariff {
                Some(value) if value.is_finite() => FieldValue::Decimal(value),
                _ => FieldValue::Absent,
            },
        }
    }

    /// Joins this record with its reimbursement condition, if any.
    pub fn enrich(self, conditions: &ConditionTable) -> EnrichedRecord {
        let condition = conditions.condition_for(self.code).map(str::to_string);
        EnrichedRecord {
            record: self,
            condition,
        }
    }
}

/// A drug record with its reimbursement condition resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: DrugRecord,
    pub condition: Option<String>,
}

impl EnrichedRecord {
    pub fn code(&self) -> DrugCode {
        self.record.code
    }

    pub fn field_value(&self, field: SearchField) -> FieldValue<'_> {
        self.record.field_value(field)
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }
}

/// Value of a searchable field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(u64),
    /// Matched through `f64` display, which never uses exponent notation.
    Decimal(f64),
    /// Neither text nor number; never matches a query.
    Absent,
}

impl FieldValue<'_> {
    /// Case-insensitive substring test against an already lowercased needle.
    ///
    /// Numbers are compared through their decimal representation.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.to_lowercase().contains(needle),
            FieldValue::Integer(value) => value.to_string().contains(needle),
            FieldValue::Decimal(value) => value.to_string().contains(needle),
            FieldValue::Absent => false,
        }
    }
}

/// Field a query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    CommercialName,
    #[default]
    GenericName,
    Code,
    Tariff,
}

impl SearchField {
    /// The two fields offered by the interactive view.
    pub const TOGGLEABLE: [SearchField; 2] = [SearchField::CommercialName, SearchField::GenericName];

    pub fn label(self) -> &'static str {
        match self {
            SearchField::CommercialName => "Nom commercial",
            SearchField::GenericName => "DCI",
            SearchField::Code => "Code",
            SearchField::Tariff => "Tarif",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SearchField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commercial" | "commercial_name" | "nom commercial" => Ok(SearchField::CommercialName),
            "dci" | "generic" | "generic_name" => Ok(SearchField::GenericName),
            "code" => Ok(SearchField::Code),
            "tariff" | "tarif" => Ok(SearchField::Tariff),
            _ => Err(ModelError::UnknownSearchField(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: u64, tariff: Option<f64>) -> DrugRecord {
        DrugRecord {
            code: DrugCode::new(code).unwrap(),
            commercial_name: "Doliprane".to_string(),
            generic_name: "Paracetamol".to_string(),
            dosage: "500MG".to_string(),
            packaging: "B/16".to_string(),
            form: "COMP.".to_string(),
            tariff,
            tariff_date: "2024-11-28".to_string(),
        }
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let rec = record(1, None);
        assert!(rec.field_value(SearchField::CommercialName).contains_lowercase("dolip"));
        assert!(rec.field_value(SearchField::GenericName).contains_lowercase("cetam"));
        assert!(!rec.field_value(SearchField::GenericName).contains_lowercase("dolip"));
    }

    #[test]
    fn numbers_match_by_decimal_form() {
        let rec = record(1234, Some(120.5));
        assert!(rec.field_value(SearchField::Code).contains_lowercase("23"));
        assert!(rec.field_value(SearchField::Tariff).contains_lowercase("0.5"));
        assert!(!rec.field_value(SearchField::Code).contains_lowercase("01234"));
    }

    #[test]
    fn decimals_render_without_exponent() {
        assert!(FieldValue::Decimal(1e21).contains_lowercase("1000000000000000000000"));
        assert!(!FieldValue::Decimal(1e21).contains_lowercase("e+21"));
        assert!(FieldValue::Decimal(1e-7).contains_lowercase("0.0000001"));
        assert!(!FieldValue::Decimal(1e-7).contains_lowercase("e-7"));
    }

    #[test]
    fn absent_values_never_match() {
        let rec = record(1, None);
        assert_eq!(rec.field_value(SearchField::Tariff), FieldValue::Absent);
        assert!(!FieldValue::Absent.contains_lowercase(""));
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("dci".parse::<SearchField>(), Ok(SearchField::GenericName));
        assert_eq!(
            "Commercial".parse::<SearchField>(),
            Ok(SearchField::CommercialName)
        );
        assert!("dosage".parse::<SearchField>().is_err());
    }

    #[test]
    fn enrich_keeps_record_when_condition_missing() {
        let conditions = ConditionTable::new();
        let enriched = record(9, None).enrich(&conditions);
        assert_eq!(enriched.code().get(), 9);
        assert_eq!(enriched.condition(), None);
    }
}
