//! Cycle-safe traversal of redirect chains.

use entmine_core::types::collections::FxHashSet;
use entmine_core::types::TitleId;

use super::maps::RedirectMap;

/// Iterator over the titles of a redirect chain, starting title included.
///
/// Every title is yielded at most once. When the chain loops back onto a
/// title already yielded, iteration ends and [`revisited`](Self::revisited)
/// names that title.
pub struct RedirectWalk<'a> {
    redirects: &'a RedirectMap,
    next: Option<TitleId>,
    seen: FxHashSet<TitleId>,
    revisited: Option<TitleId>,
}

impl<'a> RedirectWalk<'a> {
    pub fn new(redirects: &'a RedirectMap, start: TitleId) -> Self {
        Self {
            redirects,
            next: Some(start),
            seen: FxHashSet::default(),
            revisited: None,
        }
    }

    /// The title that closed a cycle, if the walk ended on one.
    pub fn revisited(&self) -> Option<TitleId> {
        self.revisited
    }
}

impl Iterator for RedirectWalk<'_> {
    type Item = TitleId;

    fn next(&mut self) -> Option<TitleId> {
        let current = self.next.take()?;
        if !self.seen.insert(current) {
            self.revisited = Some(current);
            return None;
        }
        self.next = self.redirects.get(current);
        Some(current)
    }
}
