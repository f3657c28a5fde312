//! Loading of the static catalog tables and their join.

pub mod bundled;
pub mod catalog;
pub mod conditions;
pub mod drugs;
pub mod error;
pub mod join;
pub mod table;

pub use catalog::{Catalog, CatalogStats};
pub use conditions::{load_condition_table, parse_condition_json, read_condition_csv};
pub use drugs::{SHEET_NAME, load_drug_table, parse_drug_json, read_drug_csv};
pub use error::{IngestError, Result};
pub use join::enrich_records;
pub use table::TableFormat;
