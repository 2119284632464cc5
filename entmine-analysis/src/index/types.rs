//! Phrase query results.

use std::sync::Arc;

/// One outgoing link: the visible anchor text and the linked title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPair {
    pub anchor: Box<str>,
    pub target: Box<str>,
}

impl LinkPair {
    pub fn new(anchor: impl Into<Box<str>>, target: impl Into<Box<str>>) -> Self {
        Self {
            anchor: anchor.into(),
            target: target.into(),
        }
    }
}

/// A sampled document and its links, in document order.
#[derive(Debug, Clone)]
pub struct SampledDocument {
    pub title: Arc<str>,
    pub links: Arc<[LinkPair]>,
}

#[derive(Debug, Clone, Default)]
pub struct PhraseHits {
    pub total_hits: u64,
    pub documents: Vec<SampledDocument>,
}
