//! Redirect closure and cross-lingual entity propagation.

pub mod knowledge_base;
pub mod maps;
pub mod propagate;
pub mod redirects;
pub mod walk;

pub use knowledge_base::{KnowledgeBase, KnowledgeBaseBuilder};
pub use maps::{EntityMap, RedirectMap};
pub use propagate::{propagate_entities, PropagationStats};
pub use redirects::{close_redirects, ClosureStats};
pub use walk::RedirectWalk;
