//! ErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to provide a structured error code
/// string for log aggregation and process exit reporting.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "LOAD_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const LOAD_ERROR: &str = "LOAD_ERROR";
pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const INDEX_ERROR: &str = "INDEX_ERROR";
pub const PATTERN_ERROR: &str = "PATTERN_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
