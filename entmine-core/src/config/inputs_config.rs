//! Input and output locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXCLUDED_CLASSES, DEFAULT_SITE};
use crate::errors::ConfigError;

/// Paths of the files a mining run reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InputsConfig {
    /// Candidate phrase file (`phrase<TAB>count[<TAB>seed:count...]`).
    pub candidates: Option<PathBuf>,
    /// Document table backing the phrase index.
    pub index: Option<PathBuf>,
    /// Redirect edges (`source<TAB>target`).
    pub redirects: Option<PathBuf>,
    /// Cross-lingual entity table.
    pub entities: Option<PathBuf>,
    /// Result file; stdout when absent. A `.gz` suffix selects gzip.
    pub output: Option<PathBuf>,
    /// Entity-file column holding this wiki's titles. Default: "enwiki".
    pub site: Option<String>,
    /// Instance-of classes whose rows are dropped at load time.
    #[serde(default)]
    pub excluded_classes: Vec<String>,
    /// Decode character references in loaded titles. Default: true.
    pub decode_entities: Option<bool>,
}

impl InputsConfig {
    pub fn effective_site(&self) -> &str {
        self.site.as_deref().unwrap_or(DEFAULT_SITE)
    }

    /// Returns the excluded classes, defaulting to disambiguation, list and category pages.
    pub fn effective_excluded_classes(&self) -> Vec<String> {
        if self.excluded_classes.is_empty() {
            DEFAULT_EXCLUDED_CLASSES.iter().map(|c| c.to_string()).collect()
        } else {
            self.excluded_classes.clone()
        }
    }

    pub fn effective_decode_entities(&self) -> bool {
        self.decode_entities.unwrap_or(true)
    }

    /// Returns a required path or a `MissingSetting` error naming it.
    pub fn require<'a>(
        field: &str,
        value: &'a Option<PathBuf>,
    ) -> Result<&'a Path, ConfigError> {
        value.as_deref().ok_or_else(|| ConfigError::MissingSetting {
            field: format!("inputs.{field}"),
        })
    }
}
