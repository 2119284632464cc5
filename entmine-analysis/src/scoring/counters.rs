//! Per-candidate co-occurrence counters.

use entmine_core::types::collections::FxHashMap;
use entmine_core::types::EntityId;

/// Documents in which a target co-occurs with the phrase.
///
/// Both counts are per-document and bounded by the sample size, so they
/// cannot overflow a `u32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoOccurrence {
    /// Documents linking to the target.
    pub plain: u32,
    /// Documents where a link to the target has the phrase as its anchor.
    pub exact: u32,
}

impl CoOccurrence {
    pub fn combined(&self) -> u64 {
        u64::from(self.plain) + u64::from(self.exact)
    }
}

/// Counters for one candidate, reused across candidates by a worker.
#[derive(Debug, Default)]
pub struct CoOccurrenceCounters {
    totals: FxHashMap<EntityId, CoOccurrence>,
    document: FxHashMap<EntityId, bool>,
}

impl CoOccurrenceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counts before the next candidate.
    pub fn reset(&mut self) {
        self.totals.clear();
        self.document.clear();
    }

    /// Note a link to `target` in the current document.
    pub fn record(&mut self, target: EntityId, exact: bool) {
        let seen = self.document.entry(target).or_insert(false);
        *seen |= exact;
    }

    /// Fold the current document into the totals: each target counts once,
    /// and once more as exact if any of its links matched the phrase.
    pub fn end_document(&mut self) {
        for (target, exact) in self.document.drain() {
            let counts = self.totals.entry(target).or_default();
            counts.plain += 1;
            if exact {
                counts.exact += 1;
            }
        }
    }

    pub fn get(&self, target: EntityId) -> Option<CoOccurrence> {
        self.totals.get(&target).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Targets by `plain + exact`, highest first. Ties are ordered by the
    /// name `name_of` gives, so the result does not depend on hashing.
    pub fn descending<'a>(
        &self,
        name_of: impl Fn(EntityId) -> &'a str,
    ) -> Vec<(EntityId, CoOccurrence)> {
        let mut sorted: Vec<_> = self.totals.iter().map(|(t, c)| (*t, *c)).collect();
        sorted.sort_by(|(a, ca), (b, cb)| {
            cb.combined()
                .cmp(&ca.combined())
                .then_with(|| name_of(*a).cmp(name_of(*b)))
        });
        sorted
    }
}
