//! Tests for error codes and conversions.

use std::path::PathBuf;

use entmine_core::errors::*;

#[test]
fn test_pipeline_error_forwards_subsystem_codes() {
    let load = LoadError::MalformedLine {
        path: PathBuf::from("redirects.tsv"),
        line: 3,
        expected: "2".into(),
        found: 1,
    };
    let err: PipelineError = load.into();
    assert_eq!(err.error_code(), "MALFORMED_INPUT");
    assert!(err.to_string().contains("line 3"));

    let config: PipelineError = ConfigError::MissingSetting {
        field: "inputs.index".into(),
    }
    .into();
    assert_eq!(config.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_coded_string_format() {
    let err = PipelineError::Cancelled;
    assert_eq!(err.coded_string(), "[CANCELLED] Pipeline cancelled");
}

#[test]
fn test_io_load_error_code() {
    let err = LoadError::Io {
        path: PathBuf::from("missing.tsv"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
    };
    assert_eq!(err.error_code(), "LOAD_ERROR");
}

#[test]
fn test_pattern_conflict_message() {
    let err = PatternError::ConflictingReplacement {
        pattern: "&x;".into(),
        existing: "a".into(),
        replacement: "b".into(),
    };
    assert_eq!(err.error_code(), "PATTERN_ERROR");
    assert!(err.to_string().contains("&x;"));
}
