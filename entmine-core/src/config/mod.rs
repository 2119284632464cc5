//! Configuration system for entmine.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod inputs_config;
pub mod miner_config;
pub mod runtime_config;
pub mod scoring_config;
pub mod subset_config;

pub use inputs_config::InputsConfig;
pub use miner_config::{CliOverrides, MinerConfig};
pub use runtime_config::RuntimeConfig;
pub use scoring_config::ScoringConfig;
pub use subset_config::SubsetConfig;
