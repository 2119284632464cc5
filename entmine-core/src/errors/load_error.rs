//! Load-phase errors (redirect, entity, document and candidate files).
//!
//! These files come from a trusted upstream stage, so a malformed line is
//! fatal for the run rather than skipped.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed line {line} in {path}: expected {expected} columns, found {found}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        expected: String,
        found: usize,
    },

    #[error("Missing header row in {path}")]
    MissingHeader { path: PathBuf },

    #[error("Column {column} not present in header of {path}")]
    MissingColumn { path: PathBuf, column: String },
}

impl ErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::LOAD_ERROR,
            _ => error_code::MALFORMED_INPUT,
        }
    }
}
