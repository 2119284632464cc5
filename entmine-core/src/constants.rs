//! Shared constants for the entmine mining engine.

/// entmine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Scoring ----

/// Default minimum number of raw mentions (and sampled documents) a phrase needs.
pub const DEFAULT_MINIMUM_MENTIONS: u32 = 20;

/// Default cap on the number of documents sampled per phrase query.
pub const DEFAULT_SAMPLE_LIMIT: usize = 10_000;

/// The initial support threshold is at least `sample size / MINSUPP_SAMPLE_DIVISOR`.
pub const MINSUPP_SAMPLE_DIVISOR: u32 = 10;

/// Once a target with plain count `c` is accepted, the threshold rises to `c / MINSUPP_WINNER_DIVISOR`.
pub const MINSUPP_WINNER_DIVISOR: u32 = 4;

/// Confidence is `(plain + exact) * CONFIDENCE_SCALE / total_hits`.
pub const CONFIDENCE_SCALE: u64 = 50;

// ---- Runtime ----

/// Bounded work queue capacity. The output queue holds one more.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Poll interval for queue reads and completion waits, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// First progress report happens after this many candidates.
pub const PROGRESS_INITIAL_STEP: usize = 10;

// ---- Inputs ----

/// Default site column of the cross-lingual entity file.
pub const DEFAULT_SITE: &str = "enwiki";

/// Header name of the optional instance-of column in the entity file.
pub const INSTANCE_OF_COLUMN: &str = "instance_of";

/// Classes whose members are never entities: disambiguation pages,
/// list articles and categories.
pub const DEFAULT_EXCLUDED_CLASSES: [&str; 3] = ["Q4167410", "Q13406463", "Q4167836"];

// ---- Recommended subset ----

pub const DEFAULT_SUBSET_MIN_PHRASE_CHARS: usize = 3;
pub const DEFAULT_SUBSET_MIN_HITS: u64 = 50;
pub const DEFAULT_SUBSET_MIN_TRUST: u64 = 90;
pub const DEFAULT_SUBSET_MIN_TRUST_EXACT: u64 = 80;
pub const DEFAULT_SUBSET_MIN_CONTRAST: u64 = 20;

// ---- Configuration ----

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "entmine.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "ENTMINE_LOG";
