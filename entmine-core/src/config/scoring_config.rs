//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MINIMUM_MENTIONS, DEFAULT_SAMPLE_LIMIT};

/// Configuration for candidate scoring.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum raw mentions and sampled documents. Default: 20.
    pub minimum_mentions: Option<u32>,
    /// Cap on documents sampled per phrase query. Default: 10000.
    pub sample_limit: Option<usize>,
    /// Only emit targets named as seeds on the candidate line. Default: false.
    pub restrict_to_seeds: Option<bool>,
    /// Cap confidence values at 100%. Default: false.
    pub clamp_confidence: Option<bool>,
}

impl ScoringConfig {
    pub fn effective_minimum_mentions(&self) -> u32 {
        self.minimum_mentions.unwrap_or(DEFAULT_MINIMUM_MENTIONS)
    }

    pub fn effective_sample_limit(&self) -> usize {
        self.sample_limit.unwrap_or(DEFAULT_SAMPLE_LIMIT)
    }

    pub fn effective_restrict_to_seeds(&self) -> bool {
        self.restrict_to_seeds.unwrap_or(false)
    }

    pub fn effective_clamp_confidence(&self) -> bool {
        self.clamp_confidence.unwrap_or(false)
    }
}
