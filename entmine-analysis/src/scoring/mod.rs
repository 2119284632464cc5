//! Candidate scoring: co-occurrence counting, adaptive support threshold
//! and result formatting.

pub mod candidate;
pub mod counters;
pub mod format;
pub mod scorer;

pub use candidate::{Candidate, CandidateState, FailReason, Outcome, Seed};
pub use counters::{CoOccurrence, CoOccurrenceCounters};
pub use scorer::{Scorer, ScoringSettings};
