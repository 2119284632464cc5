//! Error handling for entmine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod index_error;
pub mod load_error;
pub mod output_error;
pub mod pattern_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use index_error::IndexError;
pub use load_error::LoadError;
pub use output_error::OutputError;
pub use pattern_error::PatternError;
pub use pipeline_error::PipelineError;
