//! Transitive closure of redirect chains.

use entmine_core::events::types::RedirectCycleEvent;
use entmine_core::events::EventDispatcher;
use entmine_core::types::collections::{FxHashMap, SmallVec8};
use entmine_core::types::TitleId;
use entmine_core::FrozenInterner;

use super::maps::RedirectMap;
use super::walk::RedirectWalk;

/// Summary of a [`close_redirects`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosureStats {
    /// Edges remaining after closure.
    pub edges: usize,
    /// Edges whose target changed.
    pub rewritten: usize,
    /// Cycles found and broken.
    pub cycles: usize,
}

/// Rewrite every redirect to point at its final, non-redirecting target.
///
/// Chains are walked once each: titles already resolved by an earlier walk
/// short-circuit later ones. A cycle is reported once (warn log and
/// `on_redirect_cycle`); the last title reached before the chain loops back
/// becomes the cycle's terminal and loses its own edge. The result has no
/// cycles, no self-edges, and closing it again changes nothing.
pub fn close_redirects(
    redirects: &mut RedirectMap,
    interner: &FrozenInterner,
    events: &EventDispatcher,
) -> ClosureStats {
    let mut finals: FxHashMap<TitleId, TitleId> = FxHashMap::default();
    let mut path: SmallVec8<TitleId> = SmallVec8::new();
    let mut stats = ClosureStats::default();

    for (source, _) in redirects.sorted_edges() {
        if finals.contains_key(&source) {
            continue;
        }

        path.clear();
        let mut walk = RedirectWalk::new(redirects, source);
        let mut memoized = None;
        for title in walk.by_ref() {
            if let Some(&known) = finals.get(&title) {
                memoized = Some(known);
                break;
            }
            path.push(title);
        }

        let Some(&last) = path.last() else {
            continue;
        };
        let resolved = match (memoized, walk.revisited()) {
            (Some(known), _) => known,
            (None, Some(entry)) => {
                report_cycle(&path, entry, last, interner, events);
                stats.cycles += 1;
                last
            }
            (None, None) => last,
        };

        for &title in &path {
            finals.insert(title, resolved);
        }
    }

    let mut closed = FxHashMap::default();
    for (source, target) in redirects.iter() {
        let Some(&resolved) = finals.get(&source) else {
            continue;
        };
        if resolved == source {
            continue;
        }
        if resolved != target {
            stats.rewritten += 1;
        }
        closed.insert(source, resolved);
    }
    stats.edges = closed.len();
    redirects.replace_edges(closed);
    stats
}

fn report_cycle(
    path: &[TitleId],
    entry: TitleId,
    terminal: TitleId,
    interner: &FrozenInterner,
    events: &EventDispatcher,
) {
    let start = path.iter().position(|&t| t == entry).unwrap_or(0);
    let members: Vec<String> = path[start..]
        .iter()
        .map(|t| interner.resolve(&t.inner()).to_string())
        .collect();
    let terminal = interner.resolve(&terminal.inner()).to_string();
    tracing::warn!(members = ?members, terminal = %terminal, "redirect cycle detected, breaking it");
    events.emit_redirect_cycle(&RedirectCycleEvent { members, terminal });
}
