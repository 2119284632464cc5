//! Document index errors.

use super::error_code::{self, ErrorCode};

/// Errors raised by a document index while answering a phrase query.
/// A failed query fails only the candidate that issued it.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Index IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document {document} is malformed: {message}")]
    MalformedDocument { document: String, message: String },

    #[error("Index unavailable: {message}")]
    Unavailable { message: String },
}

impl ErrorCode for IndexError {
    fn error_code(&self) -> &'static str {
        error_code::INDEX_ERROR
    }
}
