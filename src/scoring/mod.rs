pub mod batch;
pub mod engine;
pub mod factors;
pub mod job;

pub use batch::{generate_scores, ScoredResult};
pub use engine::{calculate_score, round_score, FactorContribution, ScoreBreakdown, ScoreResult};
pub use factors::{Factor, FACTORS};
pub use job::{ScoringJob, ScoringRequest};
