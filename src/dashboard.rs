//! Application state behind the terminal shell.
//!
//! All mutations go through the operations here so id uniqueness, insertion
//! order and selection consistency hold regardless of how the UI drives them.

use tracing::info;

use crate::airport::AirportTable;
use crate::error::{Error, Result};
use crate::records::{FacilityRecord, RecordDraft, RecordId, RecordStore, Selection};
use crate::results::ResultsStore;
use crate::scoring::{ScoredResult, ScoringRequest};

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    store: RecordStore,
    selection: Selection,
    results: ResultsStore,
    airports: AirportTable,
    search: String,
}

impl Dashboard {
    pub fn new(airports: AirportTable) -> Self {
        Self {
            airports,
            ..Default::default()
        }
    }

    pub fn airports(&self) -> &AirportTable {
        &self.airports
    }

    pub fn records(&self) -> &[FacilityRecord] {
        self.store.list()
    }

    pub fn find(&self, id: RecordId) -> Option<&FacilityRecord> {
        self.store.find(id)
    }

    pub fn results(&self) -> &ResultsStore {
        &self.results
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn add_record(&mut self, draft: &RecordDraft) -> Result<RecordId> {
        let id = self.store.add(draft)?;
        info!(%id, total = self.store.len(), "saved record");
        Ok(id)
    }

    pub fn update_record(&mut self, id: RecordId, draft: &RecordDraft) -> Result<()> {
        self.store.update(id, draft)
    }

    /// Delete a record and drop it from the selection.
    pub fn remove_record(&mut self, id: RecordId) -> Result<FacilityRecord> {
        let removed = self.store.remove(id)?;
        self.selection.retain(|s| *s != id);
        Ok(removed)
    }

    /// Flip one record's checkbox. Unknown ids report `NotFound`.
    pub fn toggle_selected(&mut self, id: RecordId) -> Result<bool> {
        if self.store.find(id).is_none() {
            return Err(Error::NotFound(id));
        }
        Ok(self.selection.toggle(id))
    }

    /// The header checkbox: select every record, or clear when all are selected.
    pub fn toggle_select_all(&mut self) {
        let all = self.store.ids();
        self.selection.toggle_all(&all);
    }

    pub fn all_selected(&self) -> bool {
        self.selection.covers(&self.store.ids())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Records passing the current search filter, in store order.
    pub fn visible_records(&self) -> Vec<&FacilityRecord> {
        self.store.filter(&self.search)
    }

    /// Snapshot the selection and records for a scoring run.
    ///
    /// Nothing is mutated here; an empty selection is refused up front.
    pub fn prepare_scoring(&self) -> Result<ScoringRequest> {
        if self.selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        Ok(ScoringRequest {
            selection: self.selection.ids().to_vec(),
            records: self.store.list().to_vec(),
        })
    }

    /// Append a finished batch and reset the selection.
    pub fn apply_results(&mut self, batch: Vec<ScoredResult>) -> usize {
        let added = self.results.append(batch);
        self.selection.clear();
        info!(added, total = self.results.len(), "appended scored results");
        added
    }
}
