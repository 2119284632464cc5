//! Result line formatting.

use std::fmt::Write;

use entmine_core::constants::CONFIDENCE_SCALE;

use super::counters::CoOccurrence;

/// Confidence percentage `(plain + exact) * 50 / total_hits`.
///
/// Exact matches are counted twice, so the value can exceed 100 when
/// `clamp` is off.
pub fn confidence(counts: CoOccurrence, total_hits: u64, clamp: bool) -> u64 {
    if total_hits == 0 {
        return 0;
    }
    let value = counts.combined() * CONFIDENCE_SCALE / total_hits;
    if clamp {
        value.min(100)
    } else {
        value
    }
}

/// Start a result line: `phrase<TAB>totalHits`.
pub fn begin_line(phrase: &str, total_hits: u64) -> String {
    let mut line = String::with_capacity(phrase.len() + 64);
    line.push_str(phrase);
    line.push('\t');
    let _ = write!(line, "{total_hits}");
    line
}

/// Append `<TAB>target:plain:exact:confidence%`.
pub fn push_target(line: &mut String, target: &str, counts: CoOccurrence, confidence: u64) {
    let _ = write!(
        line,
        "\t{target}:{}:{}:{confidence}%",
        counts.plain, counts.exact
    );
}

/// One `target:plain:exact:confidence%` entry of a result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry<'a> {
    pub target: &'a str,
    pub plain: u64,
    pub exact: u64,
    pub confidence: u64,
}

/// Parse a result line into phrase, total hits and target entries.
/// Returns `None` for lines that do not have that shape.
pub fn parse_result_line(line: &str) -> Option<(&str, u64, Vec<TargetEntry<'_>>)> {
    let mut fields = line.split('\t');
    let phrase = fields.next()?;
    let total_hits = fields.next()?.parse().ok()?;
    let entries = fields.map(parse_entry).collect::<Option<Vec<_>>>()?;
    Some((phrase, total_hits, entries))
}

fn parse_entry(field: &str) -> Option<TargetEntry<'_>> {
    let rest = field.strip_suffix('%')?;
    let (rest, confidence) = rest.rsplit_once(':')?;
    let (rest, exact) = rest.rsplit_once(':')?;
    let (target, plain) = rest.rsplit_once(':')?;
    if target.is_empty() {
        return None;
    }
    Some(TargetEntry {
        target,
        plain: plain.parse().ok()?,
        exact: exact.parse().ok()?,
        confidence: confidence.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_unclamped_by_default() {
        let c = CoOccurrence { plain: 30, exact: 10 };
        assert_eq!(confidence(c, 100, false), 20);
        let c = CoOccurrence { plain: 100, exact: 100 };
        assert_eq!(confidence(c, 40, false), 250);
        assert_eq!(confidence(c, 40, true), 100);
    }

    #[test]
    fn line_round_trip() {
        let mut line = begin_line("New York", 120);
        push_target(&mut line, "Q60", CoOccurrence { plain: 80, exact: 60 }, 58);
        assert_eq!(line, "New York\t120\tQ60:80:60:58%");
        let (phrase, hits, entries) = parse_result_line(&line).unwrap();
        assert_eq!(phrase, "New York");
        assert_eq!(hits, 120);
        assert_eq!(entries[0].target, "Q60");
        assert_eq!(entries[0].confidence, 58);
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(parse_result_line("x\t10\tQ1:3:1").is_none());
        assert!(parse_result_line("x\tmany").is_none());
    }
}
