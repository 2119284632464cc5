//! Entity identifier propagation through redirects.

use entmine_core::FrozenInterner;

use super::maps::{EntityMap, RedirectMap};
use super::walk::RedirectWalk;

/// Summary of a [`propagate_entities`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Targets that inherited the identifier of a redirect pointing at them.
    pub pushed: usize,
    /// Redirect sources that took the identifier found along their chain.
    pub pulled: usize,
}

impl PropagationStats {
    pub fn total(&self) -> usize {
        self.pushed + self.pulled
    }
}

/// Spread entity identifiers along redirect edges.
///
/// Edges are processed in interning order. First, a redirect page that is
/// itself a canonical entry hands its identifier to a target lacking one.
/// Then every source still without an identifier walks its chain, cycle
/// safe, and takes the first identifier it meets.
pub fn propagate_entities(
    redirects: &RedirectMap,
    entities: &mut EntityMap,
    interner: &FrozenInterner,
) -> PropagationStats {
    let edges = redirects.sorted_edges();
    let mut stats = PropagationStats::default();

    for &(source, target) in &edges {
        if let Some(id) = entities.get(source) {
            if !entities.contains(target) {
                entities.insert(target, id);
                stats.pushed += 1;
            }
        }
    }

    for &(source, target) in &edges {
        if entities.contains(source) {
            continue;
        }
        let mut walk = RedirectWalk::new(redirects, target);
        let found = walk.by_ref().find_map(|title| entities.get(title));
        match found {
            Some(id) => {
                entities.insert(source, id);
                stats.pulled += 1;
            }
            None if walk.revisited().is_some() => {
                tracing::debug!(
                    title = %interner.resolve(&source.inner()),
                    "redirect chain loops without reaching an entity"
                );
            }
            None => {}
        }
    }

    stats
}
