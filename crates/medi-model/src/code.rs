#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Width of the zero-padded key used by the condition table.
pub const LOOKUP_KEY_WIDTH: usize = 5;

/// Left-pads the decimal form of `value` with zeros up to `width` digits.
///
/// Wider values are returned unchanged, never truncated.
pub fn zero_pad(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Unique identifier of a drug in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrugCode(u32);

impl DrugCode {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 99_999;

    pub fn new(value: u64) -> Result<Self, ModelError> {
        match u32::try_from(value) {
            Ok(code) if (Self::MIN..=Self::MAX).contains(&code) => Ok(Self(code)),
            _ => Err(ModelError::InvalidDrugCode(value)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Key under which the reimbursement condition of this drug is stored.
    pub fn lookup_key(self) -> String {
        zero_pad(u64::from(self.0), LOOKUP_KEY_WIDTH)
    }
}

impl fmt::Display for DrugCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for DrugCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for DrugCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
