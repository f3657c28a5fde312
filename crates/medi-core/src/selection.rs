//! Selected row of the current result list.

use serde::Serialize;

/// Row selection over a result list of catalog positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Selected {
        /// Position within the result list.
        index: usize,
        /// Position of the record within the catalog.
        record: usize,
    },
}

impl Selection {
    /// Default selection for a freshly computed result list.
    pub fn first_of(hits: &[usize]) -> Self {
        match hits.first() {
            Some(&record) => Selection::Selected { index: 0, record },
            None => Selection::None,
        }
    }

    /// Selects row `index` of `hits`; out-of-range clicks leave the selection as is.
    #[must_use]
    pub fn click(self, hits: &[usize], index: usize) -> Self {
        match hits.get(index) {
            Some(&record) => Selection::Selected { index, record },
            None => self,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Selected { index, .. } => Some(*index),
            Selection::None => None,
        }
    }

    pub fn record(&self) -> Option<usize> {
        match self {
            Selection::Selected { record, .. } => Some(*record),
            Selection::None => None,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.index() == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_of_empty_is_none() {
        assert_eq!(Selection::first_of(&[]), Selection::None);
    }

    #[test]
    fn first_of_selects_row_zero() {
        assert_eq!(
            Selection::first_of(&[4, 9]),
            Selection::Selected {
                index: 0,
                record: 4
            }
        );
    }

    #[test]
    fn click_within_bounds() {
        let hits = [4, 9, 11];
        let selection = Selection::first_of(&hits).click(&hits, 2);
        assert_eq!(selection.index(), Some(2));
        assert_eq!(selection.record(), Some(11));
        assert!(selection.is_selected(2));
    }

    #[test]
    fn click_out_of_bounds_is_ignored() {
        let hits = [4];
        let selection = Selection::first_of(&hits);
        assert_eq!(selection.click(&hits, 3), selection);
        assert_eq!(Selection::None.click(&[], 0), Selection::None);
    }
}
