//! DocumentIndex trait.

use entmine_core::errors::IndexError;

use super::types::PhraseHits;

/// Read-only phrase query service shared by all scoring workers.
pub trait DocumentIndex: Send + Sync {
    /// Find documents containing `terms` as a consecutive phrase.
    ///
    /// At most `limit` documents are returned; `total_hits` counts every
    /// match and may exceed the sample.
    fn phrase_query(&self, terms: &[&str], limit: usize) -> Result<PhraseHits, IndexError>;
}
