//! PatternRewriter behaviour on character references and typography.

use std::borrow::Cow;

use entmine_analysis::text::{
    decode_entities, normalize_typography, PatternRewriter, PrefixTree,
};
use proptest::prelude::*;

#[test]
fn test_named_and_numeric_references() {
    assert_eq!(decode_entities("&amp;"), "&");
    assert_eq!(decode_entities("&#65;"), "A");
    assert_eq!(decode_entities("&#x41;"), "A");
    assert_eq!(decode_entities("&#X41;"), "A");
    assert_eq!(decode_entities("Fish &amp; Chips"), "Fish & Chips");
    assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
}

#[test]
fn test_unknown_reference_passes_through() {
    assert_eq!(decode_entities("&foo"), "&foo");
    assert_eq!(decode_entities("a &foo b"), "a &foo b");
}

#[test]
fn test_truncated_reference_at_end_of_input() {
    assert_eq!(decode_entities("&am"), "&am");
    assert_eq!(decode_entities("x&"), "x&");
    assert_eq!(decode_entities("&#"), "&#");
    assert_eq!(decode_entities("&#x"), "&#x");
}

#[test]
fn test_numeric_without_semicolon() {
    assert_eq!(decode_entities("&#65BC"), "ABC");
    assert_eq!(decode_entities("&#x41 "), "A ");
}

#[test]
fn test_supplementary_code_point() {
    assert_eq!(decode_entities("&#128512;"), "\u{1F600}");
    assert_eq!(decode_entities("&#x1F600;"), "\u{1F600}");
}

#[test]
fn test_invalid_numeric_references_are_copied() {
    assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
    assert_eq!(decode_entities("&#;"), "&#;");
    assert_eq!(decode_entities("&#x;"), "&#x;");
}

#[test]
fn test_shorter_pattern_is_prefix_of_longer() {
    // "&not" is a legacy reference without ';', "&notin;" a longer one.
    assert_eq!(decode_entities("&notin;"), "\u{2209}");
    assert_eq!(decode_entities("&notit;"), "\u{AC}it;");
    assert_eq!(decode_entities("&not"), "\u{AC}");
}

#[test]
fn test_legacy_reference_without_semicolon() {
    assert_eq!(decode_entities("&copy 2020"), "\u{A9} 2020");
    assert_eq!(decode_entities("&eacute"), "\u{E9}");
}

#[test]
fn test_multi_character_replacement() {
    // &NotEqualTilde; decodes to two code points.
    assert_eq!(decode_entities("&NotEqualTilde;"), "\u{2242}\u{338}");
}

#[test]
fn test_typography() {
    assert_eq!(normalize_typography("a\u{2013}b\u{2014}c"), "a-b-c");
    assert_eq!(normalize_typography("it\u{2019}s `x`"), "it's 'x'");
    assert_eq!(normalize_typography("a\tb"), "a b");
    assert_eq!(normalize_typography("a\r\nb\rc\n"), "a\nb\nc\n");
}

#[test]
fn test_unchanged_text_is_borrowed() {
    assert!(matches!(decode_entities("Berlin"), Cow::Borrowed(_)));
    assert!(matches!(normalize_typography("Berlin"), Cow::Borrowed(_)));
}

#[test]
fn test_html_table_size() {
    let rewriter = PatternRewriter::html_entities();
    assert!(rewriter.pattern_count() > 2000);
}

#[test]
fn test_custom_tree() {
    let mut tree = PrefixTree::new();
    tree.insert("ss", "\u{DF}").unwrap();
    tree.insert("s", "S").unwrap();
    let rewriter = PatternRewriter::new(tree);
    assert_eq!(rewriter.rewrite("sss"), "\u{DF}S");
}

proptest! {
    #[test]
    fn prop_text_without_pattern_chars_is_unchanged(s in "[a-zA-Z0-9 .,;:#]{0,64}") {
        prop_assert_eq!(decode_entities(&s), s.as_str());
    }

    #[test]
    fn prop_rewrite_never_panics(s in "[&#;xXa-fA-F0-9a-z ]{0,64}") {
        let _ = decode_entities(&s);
    }
}
