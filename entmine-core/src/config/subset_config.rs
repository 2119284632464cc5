//! Recommended-subset selection thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SUBSET_MIN_CONTRAST, DEFAULT_SUBSET_MIN_HITS, DEFAULT_SUBSET_MIN_PHRASE_CHARS,
    DEFAULT_SUBSET_MIN_TRUST, DEFAULT_SUBSET_MIN_TRUST_EXACT,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SubsetConfig {
    /// Minimum phrase length in characters. Default: 3.
    pub min_phrase_chars: Option<usize>,
    /// Minimum total hits of the phrase. Default: 50.
    pub min_hits: Option<u64>,
    /// Minimum confidence of the best target. Default: 90.
    pub min_trust: Option<u64>,
    /// Minimum confidence when the best target has exact anchor matches. Default: 80.
    pub min_trust_exact: Option<u64>,
    /// Keep only phrases whose best target has exact anchor matches. Default: true.
    pub exact_only: Option<bool>,
    /// The runner-up must trail the best by more than this. Default: 20.
    pub min_contrast: Option<u64>,
}

impl SubsetConfig {
    pub fn effective_min_phrase_chars(&self) -> usize {
        self.min_phrase_chars.unwrap_or(DEFAULT_SUBSET_MIN_PHRASE_CHARS)
    }

    pub fn effective_min_hits(&self) -> u64 {
        self.min_hits.unwrap_or(DEFAULT_SUBSET_MIN_HITS)
    }

    pub fn effective_min_trust(&self) -> u64 {
        self.min_trust.unwrap_or(DEFAULT_SUBSET_MIN_TRUST)
    }

    pub fn effective_min_trust_exact(&self) -> u64 {
        self.min_trust_exact.unwrap_or(DEFAULT_SUBSET_MIN_TRUST_EXACT)
    }

    pub fn effective_exact_only(&self) -> bool {
        self.exact_only.unwrap_or(true)
    }

    pub fn effective_min_contrast(&self) -> u64 {
        self.min_contrast.unwrap_or(DEFAULT_SUBSET_MIN_CONTRAST)
    }
}
