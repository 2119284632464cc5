//! Candidate records.

use std::sync::OnceLock;

use entmine_core::types::collections::SmallVec4;

/// A target suggested for the phrase by the upstream extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub target: Box<str>,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateState {
    Pending,
    Failed,
    Succeeded,
}

/// Why a candidate produced no output line. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    /// Raw mention count below the configured minimum.
    BelowMinimumMentions,
    /// Fewer sampled documents than the configured minimum.
    TooRare,
    /// No target reached the support threshold.
    NoSurvivingTarget,
    /// The index query failed for this phrase.
    IndexFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Failed(FailReason),
    /// The formatted output line, without a trailing newline.
    Succeeded(String),
}

/// A phrase under evaluation.
///
/// Created by ingestion, completed exactly once by one worker, then only
/// read by the output stage.
#[derive(Debug)]
pub struct Candidate {
    ordinal: u64,
    phrase: Box<str>,
    raw_mentions: u32,
    seeds: SmallVec4<Seed>,
    outcome: OnceLock<Outcome>,
}

impl Candidate {
    pub fn new(ordinal: u64, phrase: &str, raw_mentions: u32, seeds: SmallVec4<Seed>) -> Self {
        Self {
            ordinal,
            phrase: phrase.into(),
            raw_mentions,
            seeds,
            outcome: OnceLock::new(),
        }
    }

    /// Position of the candidate in the input stream.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn raw_mentions(&self) -> u32 {
        self.raw_mentions
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn state(&self) -> CandidateState {
        match self.outcome.get() {
            None => CandidateState::Pending,
            Some(Outcome::Failed(_)) => CandidateState::Failed,
            Some(Outcome::Succeeded(_)) => CandidateState::Succeeded,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.outcome.get().is_none()
    }

    /// Record the outcome. Returns false, leaving the first outcome in
    /// place, if the candidate was already completed.
    pub fn complete(&self, outcome: Outcome) -> bool {
        self.outcome.set(outcome).is_ok()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.get()
    }

    /// The output line, if the candidate succeeded.
    pub fn result_line(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(Outcome::Succeeded(line)) => Some(line),
            _ => None,
        }
    }
}
