//! The search view controller.
//!
//! `SearchView` owns the query state and is the only place it changes. Input
//! arrives as [`ViewEvent`]s, the debounce timer is advanced with
//! [`SearchView::tick`], and the filtered result list is recomputed
//! synchronously whenever its inputs (effective query, search field) change.
//!
//! ```text
//! QueryChanged ──► query ──(debounce)──► debounced_query ─┐
//! FieldChanged ──► field ─────────────────────────────────┼──► results ──► selection
//! RowClicked ──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use medi_model::{EnrichedRecord, SearchField};

use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::filter::{filter_records, is_blank};
use crate::selection::Selection;

/// User input applied to a [`SearchView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The raw query text changed.
    QueryChanged(String),
    /// The user picked another search field.
    FieldChanged(SearchField),
    /// The user clicked row `n` of the displayed results.
    RowClicked(usize),
}

/// Coarse state of the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum SearchStatus {
    /// The query is empty: nothing has been searched.
    Idle,
    /// A search ran and matched nothing.
    NoMatches,
    /// A search ran and matched this many records.
    Matches(usize),
}

/// One memoized filter pass.
#[derive(Debug, Clone)]
struct ResultSet {
    generation: u64,
    query: String,
    field: SearchField,
    hits: Arc<[usize]>,
}

impl ResultSet {
    fn is_for(&self, query: &str, field: SearchField) -> bool {
        self.field == field && self.query == query
    }
}

#[derive(Debug, Clone)]
pub struct SearchView {
    records: Arc<[EnrichedRecord]>,
    query: String,
    debounced_query: String,
    field: SearchField,
    debouncer: Debouncer<String>,
    results: ResultSet,
    selection: Selection,
}

impl SearchView {
    pub fn new(records: Arc<[EnrichedRecord]>, config: ViewConfig) -> Self {
        Self {
            records,
            query: String::new(),
            debounced_query: String::new(),
            field: config.initial_field,
            debouncer: Debouncer::new(config.debounce_window()),
            results: ResultSet {
                generation: 0,
                query: String::new(),
                field: config.initial_field,
                hits: Arc::from(Vec::new()),
            },
            selection: Selection::None,
        }
    }

    /// Applies one input event. Returns whether anything visible changed.
    pub fn update(&mut self, event: ViewEvent, now: Instant) -> bool {
        match event {
            ViewEvent::QueryChanged(query) => {
                if query == self.query {
                    return false;
                }
                debug!(query = %query, "query changed");
                self.query = query.clone();
                self.debouncer.schedule(query, now);
                self.refresh();
                true
            }
            ViewEvent::FieldChanged(field) => {
                if field == self.field {
                    return false;
                }
                debug!(field = %field, "search field changed");
                self.field = field;
                self.refresh();
                true
            }
            ViewEvent::RowClicked(index) => {
                let selection = self.selection.click(&self.results.hits, index);
                if selection == self.selection {
                    if selection.index() != Some(index) {
                        debug!(index, results = self.results.hits.len(), "click outside results");
                    }
                    return false;
                }
                debug!(index, "row selected");
                self.selection = selection;
                true
            }
        }
    }

    /// Advances the debounce timer. Returns whether the debounced query fired
    /// and changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(query) = self.debouncer.poll(now) else {
            return false;
        };
        self.settle(query)
    }

    /// Applies the pending query immediately instead of waiting for the
    /// window to elapse. Used when input has ended.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(query) => self.settle(query),
            None => false,
        }
    }

    fn settle(&mut self, query: String) -> bool {
        if query == self.debounced_query {
            return false;
        }
        debug!(query = %query, "debounced query settled");
        self.debounced_query = query;
        self.refresh();
        true
    }

    /// Time until the pending debounced update is due, if any.
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Whether the debounced query has caught up with the raw query.
    pub fn is_settled(&self) -> bool {
        !self.debouncer.is_pending()
    }

    /// Recomputes the result list if its inputs changed, resetting the
    /// selection on every new pass.
    fn refresh(&mut self) {
        let effective = if is_blank(&self.query) {
            ""
        } else {
            self.debounced_query.as_str()
        };
        if self.results.is_for(effective, self.field) {
            return;
        }
        let hits: Arc<[usize]> = filter_records(&self.records, self.field, effective).into();
        let generation = self.results.generation + 1;
        debug!(
            query = %effective,
            field = %self.field,
            hits = hits.len(),
            generation,
            "results recomputed"
        );
        self.selection = Selection::first_of(&hits);
        self.results = ResultSet {
            generation,
            query: effective.to_string(),
            field: self.field,
            hits,
        };
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    pub fn field(&self) -> SearchField {
        self.field
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.index()
    }

    pub fn selected_record(&self) -> Option<&EnrichedRecord> {
        self.selection
            .record()
            .and_then(|position| self.records.get(position))
    }

    /// Condition of the selected record, absent when nothing is selected or
    /// the record has none.
    pub fn selected_condition(&self) -> Option<&str> {
        self.selected_record().and_then(EnrichedRecord::condition)
    }

    /// Identity of the current result list; bumps on every filter pass.
    pub fn results_generation(&self) -> u64 {
        self.results.generation
    }

    pub fn result_count(&self) -> usize {
        self.results.hits.len()
    }

    pub fn results(&self) -> impl ExactSizeIterator<Item = &EnrichedRecord> + '_ {
        self.results
            .hits
            .iter()
            .map(|&position| &self.records[position])
    }

    pub fn status(&self) -> SearchStatus {
        if is_blank(&self.query) {
            SearchStatus::Idle
        } else if self.results.hits.is_empty() {
            SearchStatus::NoMatches
        } else {
            SearchStatus::Matches(self.results.hits.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use medi_model::{DrugCode, DrugRecord};

    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    fn record(code: u64, commercial: &str, generic: &str, condition: Option<&str>) -> EnrichedRecord {
        EnrichedRecord {
            record: DrugRecord {
                code: DrugCode::new(code).unwrap(),
                commercial_name: commercial.to_string(),
                generic_name: generic.to_string(),
                dosage: String::new(),
                packaging: String::new(),
                form: String::new(),
                tariff: None,
                tariff_date: String::new(),
            },
            condition: condition.map(str::to_string),
        }
    }

    fn view() -> SearchView {
        let records: Arc<[EnrichedRecord]> = vec![
            record(1, "Doliprane", "Paracetamol", Some("Remboursable à 100%")),
            record(2, "Paralgan", "Paracetamol", None),
            record(3, "Amlor", "Amlodipine", Some("Sur ordonnance")),
        ]
        .into();
        SearchView::new(
            records,
            ViewConfig::default().with_initial_field(SearchField::CommercialName),
        )
    }

    #[test]
    fn results_wait_for_debounce() {
        let start = Instant::now();
        let mut view = view();
        view.update(ViewEvent::QueryChanged("para".to_string()), start);
        assert_eq!(view.result_count(), 0);
        assert!(!view.is_settled());

        assert!(!view.tick(start + Duration::from_millis(100)));
        assert_eq!(
            view.until_due(start + Duration::from_millis(100)),
            Some(Duration::from_millis(400))
        );
        assert!(view.tick(start + WINDOW));
        assert_eq!(view.debounced_query(), "para");
        assert_eq!(view.result_count(), 1);
        assert_eq!(view.selected_index(), Some(0));
        assert!(view.is_settled());
        assert_eq!(view.until_due(start + WINDOW), None);
    }

    #[test]
    fn same_query_does_not_reschedule() {
        let start = Instant::now();
        let mut view = view();
        assert!(view.update(ViewEvent::QueryChanged("am".to_string()), start));
        assert!(!view.update(
            ViewEvent::QueryChanged("am".to_string()),
            start + Duration::from_millis(400)
        ));
        assert!(view.tick(start + WINDOW));
    }

    #[test]
    fn field_change_recomputes_immediately() {
        let start = Instant::now();
        let mut view = view();
        view.update(ViewEvent::QueryChanged("para".to_string()), start);
        view.tick(start + WINDOW);
        let generation = view.results_generation();

        view.update(ViewEvent::FieldChanged(SearchField::GenericName), start + WINDOW);
        assert_eq!(view.result_count(), 2);
        assert!(view.results_generation() > generation);
    }

    #[test]
    fn clearing_query_empties_results_at_once() {
        let start = Instant::now();
        let mut view = view();
        view.update(ViewEvent::QueryChanged("am".to_string()), start);
        view.tick(start + WINDOW);
        assert_eq!(view.status(), SearchStatus::Matches(1));

        view.update(ViewEvent::QueryChanged("  ".to_string()), start + WINDOW);
        assert_eq!(view.status(), SearchStatus::Idle);
        assert_eq!(view.result_count(), 0);
        assert_eq!(view.selection(), Selection::None);
        assert_eq!(view.selected_condition(), None);
    }

    #[test]
    fn flush_settles_without_waiting() {
        let start = Instant::now();
        let mut view = view();
        view.update(ViewEvent::QueryChanged("dolip".to_string()), start);
        assert!(view.flush());
        assert_eq!(view.result_count(), 1);
        assert!(!view.flush());
        assert!(!view.tick(start + WINDOW));
    }

    #[test]
    fn click_out_of_range_is_ignored() {
        let start = Instant::now();
        let mut view = view();
        view.update(ViewEvent::QueryChanged("a".to_string()), start);
        view.tick(start + WINDOW);
        assert_eq!(view.result_count(), 3);
        assert!(!view.update(ViewEvent::RowClicked(3), start + WINDOW));
        assert!(view.update(ViewEvent::RowClicked(2), start + WINDOW));
        assert_eq!(view.selected_condition(), Some("Sur ordonnance"));
        assert!(!view.update(ViewEvent::RowClicked(2), start + WINDOW));
    }
}
