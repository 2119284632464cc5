//! Pipeline errors.

use super::error_code::{self, ErrorCode};
use super::{ConfigError, IndexError, LoadError, OutputError, PatternError};

/// Errors that can end a mining run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Reading candidates failed: {0}")]
    Input(std::io::Error),

    #[error("Candidate {ordinal} is still pending but no worker is left to score it")]
    WorkerLost { ordinal: u64 },

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Load(e) => e.error_code(),
            Self::Index(e) => e.error_code(),
            Self::Pattern(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
            Self::Input(_) => error_code::LOAD_ERROR,
            Self::WorkerLost { .. } => error_code::PIPELINE_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
