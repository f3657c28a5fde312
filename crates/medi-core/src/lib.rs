//! Search pipeline for the reimbursed-drug catalog.
//!
//! Raw query → debounced query → filtered result list → default selection,
//! driven by a single owner through [`SearchView`].

pub mod config;
pub mod debounce;
pub mod filter;
pub mod selection;
pub mod view;

pub use config::{DEFAULT_DEBOUNCE_MS, ViewConfig};
pub use debounce::Debouncer;
pub use filter::{filter_records, is_blank, matches};
pub use selection::Selection;
pub use view::{SearchStatus, SearchView, ViewEvent};
