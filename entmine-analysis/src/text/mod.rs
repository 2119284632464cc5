//! Text normalization: the prefix-tree pattern rewriter, HTML character
//! reference decoding, typographic cleanup and title normalization.

mod entities;
pub mod numeric;
pub mod prefix_tree;
pub mod rewriter;
pub mod title;

pub use prefix_tree::PrefixTree;
pub use rewriter::{decode_entities, normalize_typography, PatternRewriter};
pub use title::normalize_title;
