//! Prefix tree for single-pass multi-pattern substitution.
//!
//! Each node keeps its outgoing edges as a sorted `Vec<char>` with a
//! parallel `Vec<Node>`, so lookups are a binary search over a handful of
//! characters. A node may carry a replacement, marking the end of a
//! pattern, and the node reached by `&#` may be flagged as the numeric
//! reference handler.

use entmine_core::errors::PatternError;

use super::numeric::parse_numeric_reference;

const NUMERIC_PREFIX: &str = "&#";

#[derive(Debug, Default)]
struct Node {
    keys: Vec<char>,
    children: Vec<Node>,
    replacement: Option<Box<str>>,
    numeric: bool,
}

impl Node {
    fn child(&self, c: char) -> Option<&Node> {
        self.keys.binary_search(&c).ok().map(|i| &self.children[i])
    }

    fn child_or_insert(&mut self, c: char) -> &mut Node {
        let i = match self.keys.binary_search(&c) {
            Ok(i) => i,
            Err(i) => {
                self.keys.insert(i, c);
                self.children.insert(i, Node::default());
                i
            }
        };
        &mut self.children[i]
    }
}

/// What a successful match writes to the output.
#[derive(Clone, Copy)]
enum Emit<'a> {
    Text(&'a str),
    Char(char),
}

/// Multi-pattern prefix tree with longest-match semantics.
#[derive(Debug, Default)]
pub struct PrefixTree {
    root: Node,
    patterns: usize,
}

impl PrefixTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` to be replaced by `replacement`.
    ///
    /// Registering the same pair twice is a no-op. Registering a different
    /// replacement for an existing pattern is an error.
    pub fn insert(&mut self, pattern: &str, replacement: &str) -> Result<(), PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        let node = self.node_for(pattern);
        if let Some(existing) = &node.replacement {
            if existing.as_ref() == replacement {
                return Ok(());
            }
            return Err(PatternError::ConflictingReplacement {
                pattern: pattern.to_string(),
                existing: existing.to_string(),
                replacement: replacement.to_string(),
            });
        }
        node.replacement = Some(replacement.into());
        self.patterns += 1;
        Ok(())
    }

    /// Register a built-in pattern, replacing any previous replacement.
    pub(crate) fn set(&mut self, pattern: &str, replacement: &str) {
        let node = self.node_for(pattern);
        if node.replacement.replace(replacement.into()).is_none() {
            self.patterns += 1;
        }
    }

    /// Add the numeric reference handler under `&#`.
    pub fn with_numeric_references(mut self) -> Self {
        self.node_for(NUMERIC_PREFIX).numeric = true;
        self
    }

    /// Number of registered literal patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Whether any pattern begins with `c`.
    pub fn starts_with(&self, c: char) -> bool {
        self.root.keys.binary_search(&c).is_ok()
    }

    /// Try to match at byte offset `pos` of `text`.
    ///
    /// On success the replacement is appended to `out` and the number of
    /// input bytes consumed is returned. Returns 0 when nothing matches, in
    /// which case `out` is untouched. When a longer continuation fails the
    /// closest shorter match is used.
    pub fn match_at(&self, text: &str, pos: usize, out: &mut String) -> usize {
        let mut best: Option<(usize, Emit<'_>)> = None;
        let mut node = &self.root;
        let mut at = pos;

        loop {
            if let Some(replacement) = &node.replacement {
                best = Some((at, Emit::Text(&**replacement)));
            }
            if node.numeric {
                if let Some((decoded, end)) = parse_numeric_reference(text, at) {
                    best = Some((end, Emit::Char(decoded)));
                }
            }
            let Some(c) = text[at..].chars().next() else {
                break;
            };
            match node.child(c) {
                Some(next) => {
                    node = next;
                    at += c.len_utf8();
                }
                None => break,
            }
        }

        match best {
            Some((end, emit)) => {
                match emit {
                    Emit::Text(s) => out.push_str(s),
                    Emit::Char(c) => out.push(c),
                }
                end - pos
            }
            None => 0,
        }
    }

    fn node_for(&mut self, pattern: &str) -> &mut Node {
        let mut node = &mut self.root;
        for c in pattern.chars() {
            node = node.child_or_insert(c);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(tree: &PrefixTree, text: &str) -> (usize, String) {
        let mut out = String::new();
        let n = tree.match_at(text, 0, &mut out);
        (n, out)
    }

    #[test]
    fn longest_match_wins() {
        let mut tree = PrefixTree::new();
        tree.insert("&not", "¬").unwrap();
        tree.insert("&notin;", "∉").unwrap();
        assert_eq!(matched(&tree, "&notin; x"), (7, "∉".to_string()));
        assert_eq!(matched(&tree, "&nothing"), (4, "¬".to_string()));
    }

    #[test]
    fn no_match_leaves_output_untouched() {
        let mut tree = PrefixTree::new();
        tree.insert("&amp;", "&").unwrap();
        assert_eq!(matched(&tree, "&am"), (0, String::new()));
        assert_eq!(matched(&tree, "x"), (0, String::new()));
    }

    #[test]
    fn conflicting_replacement_is_rejected() {
        let mut tree = PrefixTree::new();
        tree.insert("ab", "1").unwrap();
        tree.insert("ab", "1").unwrap();
        assert_eq!(tree.pattern_count(), 1);
        assert!(matches!(
            tree.insert("ab", "2"),
            Err(PatternError::ConflictingReplacement { .. })
        ));
        assert!(matches!(tree.insert("", "2"), Err(PatternError::EmptyPattern)));
    }

    #[test]
    fn numeric_handler_falls_back_to_shorter_pattern() {
        let mut tree = PrefixTree::new().with_numeric_references();
        tree.insert("&", "AMP").unwrap();
        assert_eq!(matched(&tree, "&#65;"), (5, "A".to_string()));
        assert_eq!(matched(&tree, "&#;"), (1, "AMP".to_string()));
    }

    #[test]
    fn match_inside_text() {
        let mut tree = PrefixTree::new();
        tree.insert("é", "e").unwrap();
        let text = "café";
        let mut out = String::new();
        let pos = text.char_indices().nth(3).unwrap().0;
        assert_eq!(tree.match_at(text, pos, &mut out), 2);
        assert_eq!(out, "e");
    }
}
