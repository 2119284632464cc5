//! Per-candidate scoring against the document index.

use entmine_core::config::ScoringConfig;
use entmine_core::constants::{MINSUPP_SAMPLE_DIVISOR, MINSUPP_WINNER_DIVISOR};
use entmine_core::types::collections::{FxHashSet, SmallVec8};
use entmine_core::types::EntityId;

use super::candidate::{Candidate, FailReason, Outcome};
use super::counters::CoOccurrenceCounters;
use super::format::{begin_line, confidence, push_target};
use crate::closure::KnowledgeBase;
use crate::index::DocumentIndex;

/// Scoring thresholds resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSettings {
    pub minimum_mentions: u32,
    pub sample_limit: usize,
    pub restrict_to_seeds: bool,
    pub clamp_confidence: bool,
}

impl ScoringSettings {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            minimum_mentions: config.effective_minimum_mentions(),
            sample_limit: config.effective_sample_limit(),
            restrict_to_seeds: config.effective_restrict_to_seeds(),
            clamp_confidence: config.effective_clamp_confidence(),
        }
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

/// Scores candidates one at a time. Each worker owns one `Scorer` so the
/// counter maps are reused without locking.
pub struct Scorer<'a> {
    knowledge: &'a KnowledgeBase,
    index: &'a dyn DocumentIndex,
    settings: ScoringSettings,
    counters: CoOccurrenceCounters,
    seed_filter: FxHashSet<EntityId>,
    last_total_hits: u64,
}

impl<'a> Scorer<'a> {
    pub fn new(
        knowledge: &'a KnowledgeBase,
        index: &'a dyn DocumentIndex,
        settings: ScoringSettings,
    ) -> Self {
        Self {
            knowledge,
            index,
            settings,
            counters: CoOccurrenceCounters::new(),
            seed_filter: FxHashSet::default(),
            last_total_hits: 0,
        }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Total hits reported by the index for the last scored candidate, or 0
    /// if it was rejected before querying.
    pub fn last_total_hits(&self) -> u64 {
        self.last_total_hits
    }

    /// Score `candidate` and return its outcome. Does not complete the
    /// candidate.
    pub fn score(&mut self, candidate: &Candidate) -> Outcome {
        self.last_total_hits = 0;
        let minimum = self.settings.minimum_mentions;
        if candidate.raw_mentions() < minimum {
            return Outcome::Failed(FailReason::BelowMinimumMentions);
        }

        let knowledge = self.knowledge;
        let phrase = candidate.phrase();
        let terms: SmallVec8<&str> = phrase.split_whitespace().collect();
        let hits = match self.index.phrase_query(&terms, self.settings.sample_limit) {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(phrase = %phrase, error = %e, "phrase query failed");
                return Outcome::Failed(FailReason::IndexFailure);
            }
        };

        self.last_total_hits = hits.total_hits;
        let sample = hits.documents.len();
        if sample < minimum as usize {
            return Outcome::Failed(FailReason::TooRare);
        }
        let mut minsupp = minimum.max(sample_threshold(sample));

        self.counters.reset();
        for document in &hits.documents {
            for link in document.links.iter() {
                if let Some(entity) = knowledge.resolve_target(&link.target) {
                    self.counters
                        .record(entity, eq_ignore_case(&link.anchor, phrase));
                }
            }
            self.counters.end_document();
        }

        if self.settings.restrict_to_seeds {
            self.seed_filter.clear();
            self.seed_filter.extend(
                candidate
                    .seeds()
                    .iter()
                    .filter_map(|s| knowledge.resolve_target(&s.target)),
            );
        }

        let mut line = begin_line(phrase, hits.total_hits);
        let mut accepted = 0usize;
        for (entity, counts) in self.counters.descending(|e| knowledge.entity_name(e)) {
            if counts.plain < minsupp {
                break;
            }
            if counts.plain / MINSUPP_WINNER_DIVISOR > minsupp {
                minsupp = counts.plain / MINSUPP_WINNER_DIVISOR;
            }
            if self.settings.restrict_to_seeds && !self.seed_filter.contains(&entity) {
                continue;
            }
            let conf = confidence(counts, hits.total_hits, self.settings.clamp_confidence);
            push_target(&mut line, knowledge.entity_name(entity), counts, conf);
            accepted += 1;
        }

        if accepted == 0 {
            Outcome::Failed(FailReason::NoSurvivingTarget)
        } else {
            Outcome::Succeeded(line)
        }
    }
}

fn sample_threshold(sample: usize) -> u32 {
    u32::try_from(sample / MINSUPP_SAMPLE_DIVISOR as usize).unwrap_or(u32::MAX)
}

/// Unicode case-insensitive equality.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_anchor_match() {
        assert!(eq_ignore_case("New York", "new york"));
        assert!(eq_ignore_case("ÉCOLE", "école"));
        assert!(!eq_ignore_case("New York", "New  York"));
    }

    #[test]
    fn threshold_from_sample() {
        assert_eq!(sample_threshold(100), 10);
        assert_eq!(sample_threshold(9), 0);
    }
}
