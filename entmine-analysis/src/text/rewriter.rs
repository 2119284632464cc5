//! Single-pass text rewriting on top of [`PrefixTree`].

use std::borrow::Cow;
use std::sync::OnceLock;

use super::entities::NAMED_REFERENCES;
use super::prefix_tree::PrefixTree;

/// Typographic substitutions applied to article text and anchors.
const TYPOGRAPHY: &[(&str, &str)] = &[
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("`", "'"),
    ("\u{2019}", "'"),
    ("\t", " "),
    ("\r\n", "\n"),
    ("\r", "\n"),
];

/// Rewrites every pattern occurrence of a [`PrefixTree`] in one left-to-right scan.
#[derive(Debug)]
pub struct PatternRewriter {
    tree: PrefixTree,
}

impl PatternRewriter {
    pub fn new(tree: PrefixTree) -> Self {
        Self { tree }
    }

    /// Decoder for named (WHATWG table) and numeric character references.
    pub fn html_entities() -> Self {
        let mut tree = PrefixTree::new().with_numeric_references();
        for (pattern, replacement) in NAMED_REFERENCES {
            tree.set(pattern, replacement);
        }
        Self::new(tree)
    }

    /// Dash, quote, tab and line-ending cleanup.
    pub fn typography() -> Self {
        let mut tree = PrefixTree::new();
        for (pattern, replacement) in TYPOGRAPHY {
            tree.set(pattern, replacement);
        }
        Self::new(tree)
    }

    pub fn pattern_count(&self) -> usize {
        self.tree.pattern_count()
    }

    /// Rewrite `text`. Input with no pattern start character is returned
    /// borrowed without copying.
    pub fn rewrite<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some(first) = text.find(|c| self.tree.starts_with(c)) else {
            return Cow::Borrowed(text);
        };

        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..first]);
        let mut pos = first;
        while let Some(c) = text[pos..].chars().next() {
            if self.tree.starts_with(c) {
                let consumed = self.tree.match_at(text, pos, &mut out);
                if consumed > 0 {
                    pos += consumed;
                    continue;
                }
            }
            out.push(c);
            pos += c.len_utf8();
        }

        if out == text {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(out)
        }
    }
}

static HTML_ENTITIES: OnceLock<PatternRewriter> = OnceLock::new();
static TYPOGRAPHY_REWRITER: OnceLock<PatternRewriter> = OnceLock::new();

/// Decode HTML character references using a lazily built shared rewriter.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    HTML_ENTITIES
        .get_or_init(PatternRewriter::html_entities)
        .rewrite(text)
}

/// Apply typographic cleanup using a lazily built shared rewriter.
pub fn normalize_typography(text: &str) -> Cow<'_, str> {
    TYPOGRAPHY_REWRITER
        .get_or_init(PatternRewriter::typography)
        .rewrite(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_table_has_no_conflicts() {
        let mut tree = PrefixTree::new();
        for (pattern, replacement) in NAMED_REFERENCES {
            tree.insert(pattern, replacement).unwrap();
        }
        assert_eq!(tree.pattern_count(), NAMED_REFERENCES.len());
        assert!(NAMED_REFERENCES.len() > 2000);
    }

    #[test]
    fn unchanged_text_is_borrowed() {
        let rewriter = PatternRewriter::html_entities();
        assert!(matches!(rewriter.rewrite("plain text"), Cow::Borrowed(_)));
        assert!(matches!(rewriter.rewrite("AT&T"), Cow::Borrowed(_)));
    }
}
