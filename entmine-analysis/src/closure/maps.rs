//! Title-keyed maps built during the load phase.

use entmine_core::types::collections::FxHashMap;
use entmine_core::types::{EntityId, TitleId};

/// Redirect edges `source -> target`. Chained until closed by
/// [`close_redirects`](super::close_redirects).
#[derive(Debug, Default, Clone)]
pub struct RedirectMap {
    edges: FxHashMap<TitleId, TitleId>,
}

impl RedirectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, returning the previous target of `source`.
    pub fn insert(&mut self, source: TitleId, target: TitleId) -> Option<TitleId> {
        self.edges.insert(source, target)
    }

    pub fn get(&self, source: TitleId) -> Option<TitleId> {
        self.edges.get(&source).copied()
    }

    /// The redirect target of `title`, or `title` itself if it does not
    /// redirect. One lookup, so the final target only once closed.
    pub fn resolve(&self, title: TitleId) -> TitleId {
        self.get(title).unwrap_or(title)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TitleId, TitleId)> + '_ {
        self.edges.iter().map(|(s, t)| (*s, *t))
    }

    /// All edges ordered by source, for deterministic processing.
    pub fn sorted_edges(&self) -> Vec<(TitleId, TitleId)> {
        let mut edges: Vec<_> = self.iter().collect();
        edges.sort_unstable();
        edges
    }

    pub(crate) fn replace_edges(&mut self, edges: FxHashMap<TitleId, TitleId>) {
        self.edges = edges;
    }
}

/// Title to cross-lingual entity identifier.
#[derive(Debug, Default, Clone)]
pub struct EntityMap {
    ids: FxHashMap<TitleId, EntityId>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: TitleId, entity: EntityId) -> Option<EntityId> {
        self.ids.insert(title, entity)
    }

    pub fn get(&self, title: TitleId) -> Option<EntityId> {
        self.ids.get(&title).copied()
    }

    pub fn contains(&self, title: TitleId) -> bool {
        self.ids.contains_key(&title)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TitleId, EntityId)> + '_ {
        self.ids.iter().map(|(t, e)| (*t, *e))
    }
}
