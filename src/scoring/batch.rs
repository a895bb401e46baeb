use chrono::{DateTime, Utc};
use tracing::debug;

use super::engine::{calculate_score, ScoreBreakdown};
use crate::error::{Error, Result};
use crate::records::{FacilityRecord, RecordId};

/// A record snapshot with its computed score. Never mutated once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub record: FacilityRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub scored_at: DateTime<Utc>,
}

/// Score every selected record, in selection order.
///
/// Ids missing from `records` are skipped. If any found record cannot be
/// scored the whole batch fails and nothing is returned, so the caller never
/// appends a partial batch.
pub fn generate_scores(
    selection: &[RecordId],
    records: &[FacilityRecord],
) -> Result<Vec<ScoredResult>> {
    if selection.is_empty() {
        return Err(Error::EmptySelection);
    }

    let scored_at = Utc::now();
    let mut results = Vec::with_capacity(selection.len());

    for id in selection {
        let Some(record) = records.iter().find(|r| r.id == *id) else {
            debug!(%id, "selected record no longer exists, skipping");
            continue;
        };
        let result = calculate_score(record)?;
        results.push(ScoredResult {
            record: record.clone(),
            score: result.score,
            breakdown: result.breakdown,
            scored_at,
        });
    }

    debug!(
        selected = selection.len(),
        scored = results.len(),
        "batch scored"
    );
    Ok(results)
}
