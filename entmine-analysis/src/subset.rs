//! Recommended subset: phrases whose best target is trustworthy enough to
//! use as a one-to-one dictionary entry.

use std::io::{self, BufRead, Write};

use entmine_core::config::SubsetConfig;
use serde::Serialize;

use crate::scoring::format::parse_result_line;

/// Selection thresholds, resolved from `[subset]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetFilter {
    pub min_phrase_chars: usize,
    pub min_hits: u64,
    pub min_trust: u64,
    pub min_trust_exact: u64,
    pub exact_only: bool,
    pub min_contrast: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubsetStats {
    pub read: u64,
    pub selected: u64,
    pub unparsable: u64,
}

/// Why [`SubsetFilter::select`] rejected a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unparsable,
    TooShort,
    TooFewHits,
    NoTargets,
    LowTrust,
    NotExact,
    LowContrast,
}

impl SubsetFilter {
    pub fn from_config(config: &SubsetConfig) -> Self {
        Self {
            min_phrase_chars: config.effective_min_phrase_chars(),
            min_hits: config.effective_min_hits(),
            min_trust: config.effective_min_trust(),
            min_trust_exact: config.effective_min_trust_exact(),
            exact_only: config.effective_exact_only(),
            min_contrast: config.effective_min_contrast(),
        }
    }

    /// Return `(phrase, best target)` for a result line that passes every
    /// threshold.
    pub fn select<'l>(&self, line: &'l str) -> Result<(&'l str, &'l str), Rejection> {
        let (phrase, total_hits, entries) = parse_result_line(line).ok_or(Rejection::Unparsable)?;
        if total_hits < self.min_hits {
            return Err(Rejection::TooFewHits);
        }
        if phrase.chars().count() < self.min_phrase_chars {
            return Err(Rejection::TooShort);
        }
        let best = entries.first().ok_or(Rejection::NoTargets)?;
        let exact = best.exact > 0;
        let required = if exact { self.min_trust_exact } else { self.min_trust };
        if best.confidence < required {
            return Err(Rejection::LowTrust);
        }
        if self.exact_only && !exact {
            return Err(Rejection::NotExact);
        }
        if let Some(second) = entries.get(1) {
            if second.confidence + self.min_contrast >= best.confidence {
                return Err(Rejection::LowContrast);
            }
        }
        Ok((phrase, best.target))
    }

    /// Filter result lines from `input`, writing `phrase<TAB>target` lines.
    pub fn filter(&self, input: impl BufRead, output: &mut dyn Write) -> io::Result<SubsetStats> {
        let mut stats = SubsetStats::default();
        for line in input.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            stats.read += 1;
            match self.select(&line) {
                Ok((phrase, target)) => {
                    writeln!(output, "{phrase}\t{target}")?;
                    stats.selected += 1;
                }
                Err(Rejection::Unparsable) => {
                    stats.unparsable += 1;
                    tracing::warn!(line = stats.read, "result line did not parse");
                }
                Err(_) => {}
            }
        }
        output.flush()?;
        Ok(stats)
    }
}

impl Default for SubsetFilter {
    fn default() -> Self {
        Self::from_config(&SubsetConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SubsetFilter {
        SubsetFilter::default()
    }

    #[test]
    fn selects_trusted_exact_best() {
        assert_eq!(
            filter().select("Berlin\t400\tQ64:300:290:147%\tQ821244:30:2:4%"),
            Ok(("Berlin", "Q64"))
        );
    }

    #[test]
    fn thresholds() {
        let f = filter();
        assert_eq!(f.select("Be\t400\tQ1:300:290:147%"), Err(Rejection::TooShort));
        assert_eq!(f.select("Berlin\t40\tQ1:30:29:147%"), Err(Rejection::TooFewHits));
        assert_eq!(f.select("Berlin\t400\tQ1:100:50:79%"), Err(Rejection::LowTrust));
        assert_eq!(f.select("Berlin\t400\tQ1:200:0:95%"), Err(Rejection::NotExact));
        assert_eq!(
            f.select("Berlin\t400\tQ1:300:290:100%\tQ2:200:100:80%"),
            Err(Rejection::LowContrast)
        );
        assert_eq!(f.select("Berlin\t400"), Err(Rejection::NoTargets));
        assert_eq!(f.select("garbage"), Err(Rejection::Unparsable));
    }

    #[test]
    fn non_exact_allowed_when_configured() {
        let f = SubsetFilter {
            exact_only: false,
            ..filter()
        };
        assert_eq!(f.select("Berlin\t400\tQ1:200:0:95%"), Ok(("Berlin", "Q1")));
        assert_eq!(f.select("Berlin\t400\tQ1:200:0:85%"), Err(Rejection::LowTrust));
    }
}
