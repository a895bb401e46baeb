use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};

use super::draft::{RecordDraft, ValidDraft};
use super::types::{FacilityRecord, RecordId};

/// In-memory, insertion-ordered collection of facility records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<FacilityRecord>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and append it with a fresh id.
    pub fn add(&mut self, draft: &RecordDraft) -> Result<RecordId> {
        let valid = draft.validate()?;
        let id = self.issue_id();
        let ValidDraft {
            name,
            airport,
            grade,
            pax,
            traffic,
            runway,
        } = valid;

        debug!(%id, %name, %airport, grade, "record added");
        self.records.push(FacilityRecord {
            id,
            name,
            airport,
            grade,
            pax,
            traffic,
            runway,
            parameters: Vec::new(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    /// Replace every mutable field of the record with `id`.
    ///
    /// The draft is validated before the lookup, so an invalid draft against
    /// a missing id reports the validation problem.
    pub fn update(&mut self, id: RecordId, draft: &RecordDraft) -> Result<()> {
        let valid = draft.validate()?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound(id))?;

        record.name = valid.name;
        record.airport = valid.airport;
        record.grade = valid.grade;
        record.pax = valid.pax;
        record.traffic = valid.traffic;
        record.runway = valid.runway;

        debug!(%id, "record updated");
        Ok(())
    }

    /// Remove the record with `id`, returning it.
    pub fn remove(&mut self, id: RecordId) -> Result<FacilityRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = self.records.remove(pos);
        debug!(%id, name = %removed.name, "record removed");
        Ok(removed)
    }

    pub fn list(&self) -> &[FacilityRecord] {
        &self.records
    }

    pub fn find(&self, id: RecordId) -> Option<&FacilityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records matching a search query, in store order.
    pub fn filter(&self, query: &str) -> Vec<&FacilityRecord> {
        self.records
            .iter()
            .filter(|r| r.matches_query(query))
            .collect()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn issue_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId::new(self.next_id)
    }
}
