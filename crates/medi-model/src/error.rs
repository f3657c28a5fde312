use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("drug code {0} is outside 1..=99999")]
    InvalidDrugCode(u64),
    #[error("condition key {0:?} is not a numeric drug code")]
    InvalidConditionKey(String),
    #[error("unknown search field: {0}")]
    UnknownSearchField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
