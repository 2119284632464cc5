//! Core types, errors, configuration, events and tracing shared by every
//! entmine crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod traits;
pub mod tracing;
pub mod types;

pub use config::MinerConfig;
pub use errors::ErrorCode;
pub use traits::{Cancellable, CancellationToken};
pub use types::{EntityId, FrozenInterner, TitleId, TitleInterner};
