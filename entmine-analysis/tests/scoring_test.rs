//! Scoring arithmetic and outcome tests.

use entmine_analysis::closure::{KnowledgeBase, KnowledgeBaseBuilder};
use entmine_analysis::index::{DocumentIndex, LinkPair, MemoryIndex, PhraseHits};
use entmine_analysis::scoring::{Candidate, FailReason, Outcome, Scorer, ScoringSettings, Seed};
use entmine_core::errors::IndexError;
use entmine_core::events::EventDispatcher;
use entmine_core::types::collections::SmallVec4;

fn knowledge(entities: &[(&str, &str)], redirects: &[(&str, &str)]) -> KnowledgeBase {
    let mut builder = KnowledgeBaseBuilder::new();
    for (id, title) in entities {
        builder.add_entity(id, title);
    }
    for (source, target) in redirects {
        builder.add_redirect(source, target);
    }
    builder.build(&EventDispatcher::new())
}

fn candidate(phrase: &str, raw: u32) -> Candidate {
    Candidate::new(0, phrase, raw, SmallVec4::new())
}

fn settings(minimum_mentions: u32) -> ScoringSettings {
    ScoringSettings {
        minimum_mentions,
        ..ScoringSettings::default()
    }
}

/// `total` documents mention "foo bar"; the i-th links to every target
/// whose count exceeds i, with the phrase as anchor for the first `exact`.
fn corpus(total: usize, targets: &[(&str, usize, usize)]) -> MemoryIndex {
    let mut index = MemoryIndex::new();
    for i in 0..total {
        let links = targets
            .iter()
            .filter(|(_, plain, _)| i < *plain)
            .map(|(target, _, exact)| {
                let anchor = if i < *exact { "Foo Bar" } else { "something else" };
                LinkPair::new(anchor, *target)
            })
            .collect();
        index.add_document(&format!("Doc {i}"), "they said foo bar again", links);
    }
    index
}

fn line(outcome: Outcome) -> String {
    match outcome {
        Outcome::Succeeded(line) => line,
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn test_weak_target_below_minsupp_is_not_emitted() {
    let kb = knowledge(&[("Q1", "Strong"), ("Q2", "Weak")], &[]);
    let index = corpus(100, &[("Strong", 30, 10), ("Weak", 15, 0)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));

    // minsupp = max(20, 100 / 10) = 20; confidence = (30 + 10) * 50 / 100.
    let result = line(scorer.score(&candidate("foo bar", 500)));
    assert_eq!(result, "foo bar\t100\tQ1:30:10:20%");
    assert_eq!(scorer.last_total_hits(), 100);
}

#[test]
fn test_strong_winner_raises_threshold() {
    let kb = knowledge(&[("Q1", "A"), ("Q2", "B"), ("Q3", "C")], &[]);
    let index = corpus(200, &[("A", 160, 0), ("B", 45, 0), ("C", 30, 0)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));

    // After A, minsupp rises to 160 / 4 = 40: B (45) passes, C (30) does not.
    let result = line(scorer.score(&candidate("foo bar", 500)));
    assert_eq!(result, "foo bar\t200\tQ1:160:0:40%\tQ2:45:0:11%");
}

#[test]
fn test_below_minimum_mentions_skips_query() {
    let kb = knowledge(&[("Q1", "A")], &[]);
    let index = corpus(100, &[("A", 100, 0)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    assert_eq!(
        scorer.score(&candidate("foo bar", 19)),
        Outcome::Failed(FailReason::BelowMinimumMentions)
    );
    assert_eq!(scorer.last_total_hits(), 0);
}

#[test]
fn test_too_rare() {
    let kb = knowledge(&[("Q1", "A")], &[]);
    let index = corpus(19, &[("A", 19, 0)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    assert_eq!(
        scorer.score(&candidate("foo bar", 50)),
        Outcome::Failed(FailReason::TooRare)
    );
}

#[test]
fn test_targets_without_entity_are_dropped() {
    let kb = knowledge(&[("Q1", "Known")], &[]);
    let index = corpus(100, &[("Unknown", 90, 0), ("Known", 10, 0)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    assert_eq!(
        scorer.score(&candidate("foo bar", 50)),
        Outcome::Failed(FailReason::NoSurvivingTarget)
    );
}

#[test]
fn test_redirect_targets_merge_per_document() {
    let kb = knowledge(&[("Q1", "Target")], &[("Alias", "Target")]);
    let mut index = MemoryIndex::new();
    for i in 0..40 {
        let links = vec![
            LinkPair::new("foo bar", "Alias"),
            LinkPair::new("other", "Target"),
            LinkPair::new("other", "Target"),
        ];
        index.add_document(&format!("D{i}"), "foo bar", links);
    }
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    // Each document counts once, and once as exact through the alias link.
    assert_eq!(
        line(scorer.score(&candidate("foo bar", 50))),
        "foo bar\t40\tQ1:40:40:100%"
    );
}

#[test]
fn test_restrict_to_seeds() {
    let kb = knowledge(&[("Q1", "A"), ("Q2", "B")], &[]);
    let index = corpus(100, &[("A", 80, 0), ("B", 60, 0)]);
    let settings = ScoringSettings {
        restrict_to_seeds: true,
        ..settings(20)
    };
    let mut scorer = Scorer::new(&kb, &index, settings);
    let mut seeds = SmallVec4::new();
    seeds.push(Seed {
        target: "B".into(),
        count: 7,
    });
    let c = Candidate::new(0, "foo bar", 50, seeds);
    assert_eq!(line(scorer.score(&c)), "foo bar\t100\tQ2:60:0:30%");
}

#[test]
fn test_clamped_confidence() {
    let kb = knowledge(&[("Q1", "A")], &[]);
    let index = corpus(30, &[("A", 30, 30)]);
    let clamped = ScoringSettings {
        clamp_confidence: true,
        ..settings(20)
    };
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    assert_eq!(line(scorer.score(&candidate("foo bar", 50))), "foo bar\t30\tQ1:30:30:100%");

    let index = corpus(25, &[("A", 25, 25)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    // (25 + 25) * 50 / 25 = 100, and never more than 100 when clamped.
    assert_eq!(line(scorer.score(&candidate("foo bar", 50))), "foo bar\t25\tQ1:25:25:100%");
    let mut scorer = Scorer::new(&kb, &index, clamped);
    assert_eq!(line(scorer.score(&candidate("foo bar", 50))), "foo bar\t25\tQ1:25:25:100%");
}

struct InflatedIndex(MemoryIndex);

impl DocumentIndex for InflatedIndex {
    fn phrase_query(&self, terms: &[&str], limit: usize) -> Result<PhraseHits, IndexError> {
        let mut hits = self.0.phrase_query(terms, limit)?;
        // A total below the sample size makes confidence exceed 100.
        hits.total_hits = 20;
        Ok(hits)
    }
}

#[test]
fn test_unclamped_confidence_can_exceed_100() {
    let kb = knowledge(&[("Q1", "A")], &[]);
    let index = InflatedIndex(corpus(40, &[("A", 40, 40)]));
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    assert_eq!(line(scorer.score(&candidate("foo bar", 50))), "foo bar\t20\tQ1:40:40:200%");

    let clamped = ScoringSettings {
        clamp_confidence: true,
        ..settings(20)
    };
    let mut scorer = Scorer::new(&kb, &index, clamped);
    assert_eq!(line(scorer.score(&candidate("foo bar", 50))), "foo bar\t20\tQ1:40:40:100%");
}

struct FailingIndex;

impl DocumentIndex for FailingIndex {
    fn phrase_query(&self, _terms: &[&str], _limit: usize) -> Result<PhraseHits, IndexError> {
        Err(IndexError::Unavailable {
            message: "shard offline".into(),
        })
    }
}

#[test]
fn test_index_failure_fails_only_the_candidate() {
    let kb = knowledge(&[("Q1", "A")], &[]);
    let mut scorer = Scorer::new(&kb, &FailingIndex, settings(20));
    assert_eq!(
        scorer.score(&candidate("foo bar", 50)),
        Outcome::Failed(FailReason::IndexFailure)
    );
}

#[test]
fn test_ties_break_by_entity_name() {
    let kb = knowledge(&[("Q2", "B"), ("Q1", "A")], &[]);
    let index = corpus(100, &[("B", 50, 0), ("A", 50, 0)]);
    let mut scorer = Scorer::new(&kb, &index, settings(20));
    assert_eq!(
        line(scorer.score(&candidate("foo bar", 50))),
        "foo bar\t100\tQ1:50:0:25%\tQ2:50:0:25%"
    );
}
