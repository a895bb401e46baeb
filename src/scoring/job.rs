use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::batch::{generate_scores, ScoredResult};
use crate::error::{Error, Result};
use crate::records::{FacilityRecord, RecordId};

/// Owned snapshot of everything a batch needs, taken when the user triggers
/// score generation. Later edits to the live store do not affect it.
#[derive(Debug, Clone)]
pub struct ScoringRequest {
    pub selection: Vec<RecordId>,
    pub records: Vec<FacilityRecord>,
}

/// Deferred batch scoring on a background tokio task.
///
/// The delay models a long-running computation; pass `Duration::ZERO` to
/// score immediately.
pub struct ScoringJob {
    handle: JoinHandle<Result<Vec<ScoredResult>>>,
}

impl ScoringJob {
    pub fn spawn(request: ScoringRequest, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            debug!(selected = request.selection.len(), "running scoring job");
            generate_scores(&request.selection, &request.records)
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the batch. A panicked or aborted task maps to [`Error::JobFailed`].
    pub async fn join(self) -> Result<Vec<ScoredResult>> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(Error::JobFailed("cancelled".to_string())),
            Err(e) => Err(Error::JobFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(selection: &[u64]) -> ScoringRequest {
        let records = vec![FacilityRecord {
            id: RecordId::new(1),
            name: "Terminal".to_string(),
            airport: "DPS".to_string(),
            grade: 1,
            pax: Some(6.0),
            traffic: Some(3.0),
            runway: Some(2.0),
            parameters: Vec::new(),
            created_at: Utc::now(),
        }];
        ScoringRequest {
            selection: selection.iter().map(|n| RecordId::new(*n)).collect(),
            records,
        }
    }

    #[tokio::test]
    async fn test_zero_delay_job_completes() {
        let job = ScoringJob::spawn(request(&[1]), Duration::ZERO);
        let results = job.join().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 2.5);
    }

    #[tokio::test]
    async fn test_job_propagates_empty_selection() {
        let job = ScoringJob::spawn(request(&[]), Duration::ZERO);
        assert!(matches!(job.join().await, Err(Error::EmptySelection)));
    }

    #[tokio::test]
    async fn test_aborted_job_reports_cancelled() {
        let job = ScoringJob::spawn(request(&[1]), Duration::from_secs(3600));
        job.abort();
        match job.join().await {
            Err(Error::JobFailed(msg)) => assert_eq!(msg, "cancelled"),
            other => panic!("expected cancelled job, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_defers_completion() {
        let job = ScoringJob::spawn(request(&[1]), Duration::from_secs(2));
        tokio::task::yield_now().await;
        assert!(!job.is_finished());

        let results = job.join().await.unwrap();
        assert_eq!(results.len(), 1);
    }
}
