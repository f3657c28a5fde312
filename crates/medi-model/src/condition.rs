use std::collections::BTreeMap;

use crate::{DrugCode, LOOKUP_KEY_WIDTH, ModelError, zero_pad};

/// Reimbursement conditions keyed by zero-padded drug code.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ConditionTable {
    entries: BTreeMap<String, String>,
}

impl ConditionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a raw key to its padded form.
    ///
    /// Accepts `"7"`, `"00007"` or `" 7 "`; anything that is not all digits is
    /// rejected.
    pub fn normalize_key(raw: &str) -> Result<String, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidConditionKey(raw.to_string()));
        }
        let value: u64 = trimmed
            .parse()
            .map_err(|_| ModelError::InvalidConditionKey(raw.to_string()))?;
        Ok(zero_pad(value, LOOKUP_KEY_WIDTH.max(trimmed.len())))
    }

    /// Inserts a condition, returning the text previously stored under the
    /// same normalized key.
    pub fn insert(
        &mut self,
        raw_key: &str,
        condition: impl Into<String>,
    ) -> Result<Option<String>, ModelError> {
        let key = Self::normalize_key(raw_key)?;
        Ok(self.entries.insert(key, condition.into()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn condition_for(&self, code: DrugCode) -> Option<&str> {
        self.get(&code.lookup_key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ConditionTable {
    /// Collects pre-padded entries as-is.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
