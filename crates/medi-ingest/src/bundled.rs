//! Dataset shipped inside the binary.

use medi_model::CatalogInfo;

pub(crate) const DRUGS_JSON: &str = include_str!("../data/new_drugs.json");
pub(crate) const CONDITIONS_JSON: &str = include_str!("../data/condi.json");

pub(crate) const DRUGS_ORIGIN: &str = "<bundled>/new_drugs.json";
pub(crate) const CONDITIONS_ORIGIN: &str = "<bundled>/condi.json";

pub const LAST_UPDATED: &str = "28 Nov 2024";
pub const STATUS: &str = "à jour";

pub fn info() -> CatalogInfo {
    CatalogInfo::new(LAST_UPDATED, STATUS)
}
