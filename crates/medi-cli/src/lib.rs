//! Terminal front end for the reimbursed-drug catalog.

pub mod logging;
pub mod render;
pub mod session;
