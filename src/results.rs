use crate::scoring::ScoredResult;

/// Append-only history of generated scores.
#[derive(Debug, Clone, Default)]
pub struct ResultsStore {
    entries: Vec<ScoredResult>,
}

impl ResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch, returning how many entries were added.
    pub fn append(&mut self, batch: Vec<ScoredResult>) -> usize {
        let added = batch.len();
        self.entries.extend(batch);
        added
    }

    pub fn list(&self) -> &[ScoredResult] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ScoredResult> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score recorded so far, for bar scaling.
    pub fn max_score(&self) -> f64 {
        self.entries.iter().map(|r| r.score).fold(0.0_f64, f64::max)
    }
}
