//! In-memory document index for tests and small corpora.
//!
//! Documents are kept as token lists and scanned in parallel on every
//! query; there is no inverted index.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use entmine_core::errors::{IndexError, LoadError};
use rayon::prelude::*;

use super::traits::DocumentIndex;
use super::types::{LinkPair, PhraseHits, SampledDocument};
use crate::loaders::open_input;

struct StoredDocument {
    title: Arc<str>,
    tokens: Vec<Box<str>>,
    links: Arc<[LinkPair]>,
}

/// Linear-scan phrase index.
#[derive(Default)]
pub struct MemoryIndex {
    documents: Vec<StoredDocument>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, title: &str, text: &str, links: Vec<LinkPair>) {
        self.documents.push(StoredDocument {
            title: title.into(),
            tokens: tokenize(text).map(Into::into).collect(),
            links: links.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Load `title<TAB>text(<TAB>anchor<TAB>target)*` lines (plain or gzip).
    pub fn load_tsv(path: &Path) -> Result<Self, LoadError> {
        let reader = open_input(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut index = Self::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 || fields.len() % 2 != 0 {
                return Err(LoadError::MalformedLine {
                    path: path.to_path_buf(),
                    line: number + 1,
                    expected: "2 + 2n".to_string(),
                    found: fields.len(),
                });
            }
            let links = fields[2..]
                .chunks_exact(2)
                .map(|pair| LinkPair::new(pair[0], pair[1]))
                .collect();
            index.add_document(fields[0], fields[1], links);
        }
        tracing::info!(path = %path.display(), documents = index.len(), "document index loaded");
        Ok(index)
    }
}

impl DocumentIndex for MemoryIndex {
    fn phrase_query(&self, terms: &[&str], limit: usize) -> Result<PhraseHits, IndexError> {
        let query: Vec<String> = terms.iter().flat_map(|t| tokenize(t)).collect();
        if query.is_empty() {
            return Ok(PhraseHits::default());
        }

        let mut matches: Vec<&StoredDocument> = self
            .documents
            .par_iter()
            .filter(|doc| contains_phrase(&doc.tokens, &query))
            .collect();
        let total_hits = matches.len() as u64;
        matches.truncate(limit);

        Ok(PhraseHits {
            total_hits,
            documents: matches
                .into_iter()
                .map(|doc| SampledDocument {
                    title: Arc::clone(&doc.title),
                    links: Arc::clone(&doc.links),
                })
                .collect(),
        })
    }
}

/// Lower-cased alphanumeric runs.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn contains_phrase(tokens: &[Box<str>], query: &[String]) -> bool {
    tokens
        .windows(query.len())
        .any(|window| window.iter().zip(query).all(|(a, b)| **a == **b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_must_be_consecutive() {
        let mut index = MemoryIndex::new();
        index.add_document("A", "New York is big", vec![]);
        index.add_document("B", "York, new and old", vec![]);
        index.add_document("C", "the NEW-YORK times", vec![]);
        let hits = index.phrase_query(&["new", "york"], 10).unwrap();
        assert_eq!(hits.total_hits, 2);
        let titles: Vec<&str> = hits.documents.iter().map(|d| &*d.title).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn sample_is_capped_but_total_is_not() {
        let mut index = MemoryIndex::new();
        for i in 0..30 {
            index.add_document(&format!("D{i}"), "berlin wall", vec![]);
        }
        let hits = index.phrase_query(&["Berlin"], 5).unwrap();
        assert_eq!(hits.total_hits, 30);
        assert_eq!(hits.documents.len(), 5);
        assert_eq!(&*hits.documents[0].title, "D0");
    }

    #[test]
    fn empty_query_matches_nothing() {
        let mut index = MemoryIndex::new();
        index.add_document("A", "text", vec![]);
        assert_eq!(index.phrase_query(&["--"], 5).unwrap().total_hits, 0);
    }
}
