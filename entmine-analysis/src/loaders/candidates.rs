//! Candidate line parser: `phrase<TAB>count[<TAB>seed:count...]`.

use entmine_core::types::collections::SmallVec4;

use crate::scoring::{Candidate, Seed};

/// Parse one candidate line. Returns `None` when the line is malformed.
pub fn parse_candidate(ordinal: u64, line: &str) -> Option<Candidate> {
    let mut fields = line.split('\t');
    let phrase = fields.next()?.trim();
    if phrase.is_empty() {
        return None;
    }
    let raw_mentions: u32 = fields.next()?.trim().parse().ok()?;

    let mut seeds = SmallVec4::new();
    for field in fields {
        if field.is_empty() {
            continue;
        }
        let split = field.rfind(':')?;
        let count: u32 = field[split + 1..].parse().ok()?;
        let target = &field[..split];
        if target.is_empty() {
            return None;
        }
        seeds.push(Seed {
            target: target.into(),
            count,
        });
    }

    Some(Candidate::new(ordinal, phrase, raw_mentions, seeds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_phrase_count_and_seeds() {
        let c = parse_candidate(3, "New York\t120\tNew York City:80\tNew York (state):30").unwrap();
        assert_eq!(c.ordinal(), 3);
        assert_eq!(c.phrase(), "New York");
        assert_eq!(c.raw_mentions(), 120);
        assert_eq!(c.seeds().len(), 2);
        assert_eq!(&*c.seeds()[1].target, "New York (state)");
        assert_eq!(c.seeds()[1].count, 30);
    }

    #[test]
    fn seed_target_may_contain_colons() {
        let c = parse_candidate(0, "x\t5\tStar Trek: Voyager:4").unwrap();
        assert_eq!(&*c.seeds()[0].target, "Star Trek: Voyager");
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_candidate(0, "").is_none());
        assert!(parse_candidate(0, "phrase").is_none());
        assert!(parse_candidate(0, "phrase\tmany").is_none());
        assert!(parse_candidate(0, "phrase\t3\tnocount").is_none());
        assert!(parse_candidate(0, "\t3").is_none());
    }
}
