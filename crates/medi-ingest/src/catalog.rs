use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, info_span};

use medi_model::{CatalogInfo, ConditionTable, DrugRecord, EnrichedRecord};

use crate::bundled;
use crate::conditions::{load_condition_table, parse_condition_json};
use crate::drugs::{load_drug_table, parse_drug_json};
use crate::error::Result;
use crate::join::enrich_records;

/// The enriched record set, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[EnrichedRecord]>,
    info: CatalogInfo,
    orphan_conditions: usize,
}

/// Counts reported by `medirembours info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub with_condition: usize,
    pub without_condition: usize,
    /// Condition keys that match no drug code.
    pub orphan_conditions: usize,
}

impl Catalog {
    pub fn from_tables(
        records: Vec<DrugRecord>,
        conditions: &ConditionTable,
        info: CatalogInfo,
    ) -> Self {
        let codes: HashSet<String> = records
            .iter()
            .map(|record| record.code.lookup_key())
            .collect();
        let orphan_conditions = conditions
            .keys()
            .filter(|key| !codes.contains(*key))
            .count();
        let records: Arc<[EnrichedRecord]> = enrich_records(records, conditions).into();
        Self {
            records,
            info,
            orphan_conditions,
        }
    }

    /// Loads both tables from disk.
    pub fn from_paths(drugs: &Path, conditions: &Path, info: CatalogInfo) -> Result<Self> {
        let span = info_span!("load_catalog", drugs = %drugs.display(), conditions = %conditions.display());
        let _guard = span.enter();
        let start = Instant::now();
        let records = load_drug_table(drugs)?;
        let conditions = load_condition_table(conditions)?;
        let catalog = Self::from_tables(records, &conditions, info);
        info!(
            records = catalog.len(),
            duration_ms = start.elapsed().as_millis(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses the dataset embedded at build time.
    pub fn bundled() -> Result<Self> {
        let records = parse_drug_json(bundled::DRUGS_JSON, Path::new(bundled::DRUGS_ORIGIN))?;
        let conditions = parse_condition_json(
            bundled::CONDITIONS_JSON,
            Path::new(bundled::CONDITIONS_ORIGIN),
        )?;
        let catalog = Self::from_tables(records, &conditions, bundled::info());
        info!(records = catalog.len(), "bundled catalog loaded");
        Ok(catalog)
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    /// Shared handle to the record set.
    pub fn shared(&self) -> Arc<[EnrichedRecord]> {
        Arc::clone(&self.records)
    }

    pub fn info(&self) -> &CatalogInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        let with_condition = self
            .records
            .iter()
            .filter(|record| record.condition.is_some())
            .count();
        CatalogStats {
            records: self.records.len(),
            with_condition,
            without_condition: self.records.len() - with_condition,
            orphan_conditions: self.orphan_conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use medi_model::DrugCode;

    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        assert!(!catalog.is_empty());
        assert_eq!(catalog.info().last_updated, "28 Nov 2024");
        let stats = catalog.stats();
        assert_eq!(stats.records, catalog.len());
        assert_eq!(stats.with_condition + stats.without_condition, stats.records);
    }

    #[test]
    fn stats_count_orphans() {
        let mut conditions = ConditionTable::new();
        conditions.insert("1", "A").unwrap();
        conditions.insert("99", "orphan").unwrap();
        let records = vec![
            DrugRecord {
                code: DrugCode::new(1).unwrap(),
                commercial_name: "X".to_string(),
                generic_name: "Y".to_string(),
                dosage: String::new(),
                packaging: String::new(),
                form: String::new(),
                tariff: None,
                tariff_date: String::new(),
            },
            DrugRecord {
                code: DrugCode::new(2).unwrap(),
                commercial_name: "Z".to_string(),
                generic_name: "W".to_string(),
                dosage: String::new(),
                packaging: String::new(),
                form: String::new(),
                tariff: None,
                tariff_date: String::new(),
            },
        ];
        let catalog = Catalog::from_tables(records, &conditions, CatalogInfo::default());
        assert_eq!(
            catalog.stats(),
            CatalogStats {
                records: 2,
                with_condition: 1,
                without_condition: 1,
                orphan_conditions: 1,
            }
        );
        let conditions: Vec<(u32, Option<&str>)> = catalog
            .records()
            .iter()
            .map(|r| (r.code().get(), r.condition()))
            .collect();
        assert_eq!(conditions, [(1, Some("A")), (2, None)]);
    }
}
