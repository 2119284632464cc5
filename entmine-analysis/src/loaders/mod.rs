//! Readers for the load-phase files and the candidate stream, plus the
//! output sink.

pub mod candidates;
pub mod entities;
pub mod io;
pub mod redirects;

pub use candidates::parse_candidate;
pub use entities::{read_entities, EntityColumns};
pub use io::{open_input, OutputSink};
pub use redirects::read_redirects;

/// Rows accepted and skipped while reading a load-phase file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub records: usize,
    pub skipped: usize,
}
