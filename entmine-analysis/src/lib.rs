//! entmine mining engine.
//!
//! Load phase (single-threaded): redirect and entity files are read into a
//! [`closure::KnowledgeBaseBuilder`], redirect chains are closed and entity
//! identifiers propagated, and everything is frozen into a
//! [`closure::KnowledgeBase`]. Mining phase (concurrent): the
//! [`pipeline::MiningPipeline`] scores candidate phrases against a
//! [`index::DocumentIndex`] and writes results in input order.

pub mod closure;
pub mod index;
pub mod loaders;
pub mod pipeline;
pub mod scoring;
pub mod subset;
pub mod text;

pub use closure::{KnowledgeBase, KnowledgeBaseBuilder};
pub use index::{DocumentIndex, MemoryIndex};
pub use pipeline::{MiningPipeline, MiningStats};
pub use scoring::{Candidate, Scorer, ScoringSettings};
