//! Tests for the entmine configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use entmine_core::config::{CliOverrides, MinerConfig};
use entmine_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all ENTMINE_ env vars to prevent cross-test contamination.
fn clear_entmine_env_vars() {
    for key in [
        "ENTMINE_PARALLELISM",
        "ENTMINE_MINIMUM_MENTIONS",
        "ENTMINE_SAMPLE_LIMIT",
        "ENTMINE_OUTPUT",
        "ENTMINE_SITE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_entmine_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("entmine.toml"),
        r#"
[scoring]
minimum_mentions = 30
sample_limit = 500

[runtime]
parallelism = 2

[inputs]
site = "dewiki"
"#,
    )
    .unwrap();

    // Env overrides project for sample_limit
    std::env::set_var("ENTMINE_SAMPLE_LIMIT", "700");

    let cli = CliOverrides {
        minimum_mentions: Some(40),
        ..Default::default()
    };
    let config = MinerConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.scoring.minimum_mentions, Some(40));
    assert_eq!(config.scoring.sample_limit, Some(700));
    assert_eq!(config.runtime.parallelism, Some(2));
    assert_eq!(config.inputs.effective_site(), "dewiki");

    clear_entmine_env_vars();
}

#[test]
fn test_load_without_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_entmine_env_vars();

    let dir = tempdir();
    let config = MinerConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scoring.effective_minimum_mentions(), 20);
    assert_eq!(config.scoring.effective_sample_limit(), 10_000);
    assert_eq!(config.runtime.effective_queue_capacity(), 1000);
    assert_eq!(config.runtime.effective_poll_interval().as_millis(), 100);
    assert!(config.runtime.requested_parallelism() >= 1);
    assert_eq!(config.inputs.effective_site(), "enwiki");
    assert!(config.inputs.effective_decode_entities());
    assert_eq!(config.inputs.effective_excluded_classes().len(), 3);
    assert!(!config.scoring.effective_clamp_confidence());
}

#[test]
fn test_zero_parallelism_is_rejected() {
    let config = MinerConfig::from_toml("[runtime]\nparallelism = 0\n").unwrap();
    match MinerConfig::validate(&config) {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "runtime.parallelism");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_entmine_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("entmine.toml"), "[scoring\nminimum_mentions = ").unwrap();
    let err = MinerConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = MinerConfig::from_toml(
        r#"
[scoring]
minimum_mentions = 5
future_knob = "yes"

[somewhere_else]
x = 1
"#,
    )
    .unwrap();
    assert_eq!(config.scoring.effective_minimum_mentions(), 5);
}

#[test]
fn test_cli_paths_override_project_paths() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_entmine_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("entmine.toml"),
        "[inputs]\ncandidates = \"from-file.tsv\"\noutput = \"out.tsv\"\n",
    )
    .unwrap();
    let cli = CliOverrides {
        candidates: Some(PathBuf::from("from-cli.tsv")),
        ..Default::default()
    };
    let config = MinerConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.inputs.candidates, Some(PathBuf::from("from-cli.tsv")));
    assert_eq!(config.inputs.output, Some(PathBuf::from("out.tsv")));
}

#[test]
fn test_toml_round_trip_preserves_values() {
    let config = MinerConfig::from_toml(
        "[scoring]\nminimum_mentions = 7\nclamp_confidence = true\n[subset]\nmin_trust = 95\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = MinerConfig::from_toml(&text).unwrap();
    assert_eq!(back.scoring.minimum_mentions, Some(7));
    assert_eq!(back.scoring.clamp_confidence, Some(true));
    assert_eq!(back.subset.effective_min_trust(), 95);
    assert_eq!(back.subset.effective_min_trust_exact(), 80);
}

#[test]
fn test_missing_required_path_names_the_field() {
    let config = MinerConfig::default();
    let err = entmine_core::config::InputsConfig::require("entities", &config.inputs.entities)
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing required setting inputs.entities");
}
