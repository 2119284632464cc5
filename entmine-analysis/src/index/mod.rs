//! Document index seam. Phrase queries return a total hit count and a
//! bounded sample of documents with their extracted outgoing links.

pub mod memory;
pub mod traits;
pub mod types;

pub use memory::MemoryIndex;
pub use traits::DocumentIndex;
pub use types::{LinkPair, PhraseHits, SampledDocument};
