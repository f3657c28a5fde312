//! Data model for the reimbursed-drug catalog.
//!
//! Records are loaded once and never mutated; everything in this crate is a
//! plain value type shared read-only by the search pipeline.

pub mod code;
pub mod condition;
pub mod error;
pub mod info;
pub mod record;

pub use code::{DrugCode, LOOKUP_KEY_WIDTH, zero_pad};
pub use condition::ConditionTable;
pub use error::{ModelError, Result};
pub use info::CatalogInfo;
pub use record::{DrugRecord, EnrichedRecord, FieldValue, SearchField};
