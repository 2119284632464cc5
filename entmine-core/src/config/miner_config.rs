//! Top-level entmine configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{InputsConfig, RuntimeConfig, ScoringConfig, SubsetConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`ENTMINE_*`)
/// 3. Project config (`entmine.toml` in the given root)
/// 4. User config (`~/.entmine/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MinerConfig {
    pub scoring: ScoringConfig,
    pub runtime: RuntimeConfig,
    pub inputs: InputsConfig,
    pub subset: SubsetConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub candidates: Option<PathBuf>,
    pub index: Option<PathBuf>,
    pub redirects: Option<PathBuf>,
    pub entities: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub parallelism: Option<usize>,
    pub minimum_mentions: Option<u32>,
}

impl MinerConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MinerConfig) -> Result<(), ConfigError> {
        if let Some(parallelism) = config.runtime.parallelism {
            if parallelism < 1 {
                return Err(ConfigError::ValidationFailed {
                    field: "runtime.parallelism".to_string(),
                    message: "at least one worker must be allowed".to_string(),
                });
            }
        }
        if let Some(capacity) = config.runtime.queue_capacity {
            if capacity == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "runtime.queue_capacity".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(poll) = config.runtime.poll_interval_ms {
            if poll == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "runtime.poll_interval_ms".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(limit) = config.scoring.sample_limit {
            if limit == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.sample_limit".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ref site) = config.inputs.site {
            if site.trim().is_empty() || site.contains('\t') {
                return Err(ConfigError::ValidationFailed {
                    field: "inputs.site".to_string(),
                    message: "must be a non-empty column name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.entmine/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".entmine").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut MinerConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MinerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut MinerConfig, other: &MinerConfig) {
        // Scoring
        if other.scoring.minimum_mentions.is_some() {
            base.scoring.minimum_mentions = other.scoring.minimum_mentions;
        }
        if other.scoring.sample_limit.is_some() {
            base.scoring.sample_limit = other.scoring.sample_limit;
        }
        if other.scoring.restrict_to_seeds.is_some() {
            base.scoring.restrict_to_seeds = other.scoring.restrict_to_seeds;
        }
        if other.scoring.clamp_confidence.is_some() {
            base.scoring.clamp_confidence = other.scoring.clamp_confidence;
        }

        // Runtime
        if other.runtime.parallelism.is_some() {
            base.runtime.parallelism = other.runtime.parallelism;
        }
        if other.runtime.queue_capacity.is_some() {
            base.runtime.queue_capacity = other.runtime.queue_capacity;
        }
        if other.runtime.poll_interval_ms.is_some() {
            base.runtime.poll_interval_ms = other.runtime.poll_interval_ms;
        }

        // Inputs
        if other.inputs.candidates.is_some() {
            base.inputs.candidates = other.inputs.candidates.clone();
        }
        if other.inputs.index.is_some() {
            base.inputs.index = other.inputs.index.clone();
        }
        if other.inputs.redirects.is_some() {
            base.inputs.redirects = other.inputs.redirects.clone();
        }
        if other.inputs.entities.is_some() {
            base.inputs.entities = other.inputs.entities.clone();
        }
        if other.inputs.output.is_some() {
            base.inputs.output = other.inputs.output.clone();
        }
        if other.inputs.site.is_some() {
            base.inputs.site = other.inputs.site.clone();
        }
        if !other.inputs.excluded_classes.is_empty() {
            base.inputs.excluded_classes = other.inputs.excluded_classes.clone();
        }
        if other.inputs.decode_entities.is_some() {
            base.inputs.decode_entities = other.inputs.decode_entities;
        }

        // Subset
        if other.subset.min_phrase_chars.is_some() {
            base.subset.min_phrase_chars = other.subset.min_phrase_chars;
        }
        if other.subset.min_hits.is_some() {
            base.subset.min_hits = other.subset.min_hits;
        }
        if other.subset.min_trust.is_some() {
            base.subset.min_trust = other.subset.min_trust;
        }
        if other.subset.min_trust_exact.is_some() {
            base.subset.min_trust_exact = other.subset.min_trust_exact;
        }
        if other.subset.exact_only.is_some() {
            base.subset.exact_only = other.subset.exact_only;
        }
        if other.subset.min_contrast.is_some() {
            base.subset.min_contrast = other.subset.min_contrast;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ENTMINE_PARALLELISM`, `ENTMINE_MINIMUM_MENTIONS`, etc.
    fn apply_env_overrides(config: &mut MinerConfig) {
        if let Ok(val) = std::env::var("ENTMINE_PARALLELISM") {
            if let Ok(v) = val.parse::<usize>() {
                config.runtime.parallelism = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ENTMINE_MINIMUM_MENTIONS") {
            if let Ok(v) = val.parse::<u32>() {
                config.scoring.minimum_mentions = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ENTMINE_SAMPLE_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.scoring.sample_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ENTMINE_OUTPUT") {
            config.inputs.output = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("ENTMINE_SITE") {
            config.inputs.site = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut MinerConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.candidates {
            config.inputs.candidates = Some(v.clone());
        }
        if let Some(ref v) = cli.index {
            config.inputs.index = Some(v.clone());
        }
        if let Some(ref v) = cli.redirects {
            config.inputs.redirects = Some(v.clone());
        }
        if let Some(ref v) = cli.entities {
            config.inputs.entities = Some(v.clone());
        }
        if let Some(ref v) = cli.output {
            config.inputs.output = Some(v.clone());
        }
        if let Some(v) = cli.parallelism {
            config.runtime.parallelism = Some(v);
        }
        if let Some(v) = cli.minimum_mentions {
            config.scoring.minimum_mentions = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
