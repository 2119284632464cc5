//! Prefix-tree pattern registration errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Empty pattern cannot be registered")]
    EmptyPattern,

    #[error("Contradicting replacements for {pattern:?}: {existing:?} vs {replacement:?}")]
    ConflictingReplacement {
        pattern: String,
        existing: String,
        replacement: String,
    },
}

impl ErrorCode for PatternError {
    fn error_code(&self) -> &'static str {
        error_code::PATTERN_ERROR
    }
}
