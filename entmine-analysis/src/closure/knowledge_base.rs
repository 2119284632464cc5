//! Frozen lookup state shared by all scoring workers.

use std::borrow::Cow;
use std::path::Path;

use entmine_core::errors::LoadError;
use entmine_core::events::types::{ClosureCompleteEvent, LoadCompleteEvent};
use entmine_core::events::EventDispatcher;
use entmine_core::types::{EntityId, FrozenInterner, TitleId, TitleInterner};

use super::maps::{EntityMap, RedirectMap};
use super::propagate::propagate_entities;
use super::redirects::close_redirects;
use crate::loaders::{self, LoadSummary};
use crate::text::{decode_entities, normalize_title};

/// Collects redirects and entities during the single-threaded load phase.
pub struct KnowledgeBaseBuilder {
    interner: TitleInterner,
    redirects: RedirectMap,
    entities: EntityMap,
    decode_entities: bool,
}

impl KnowledgeBaseBuilder {
    pub fn new() -> Self {
        Self {
            interner: TitleInterner::new(),
            redirects: RedirectMap::new(),
            entities: EntityMap::new(),
            decode_entities: true,
        }
    }

    /// Whether character references in titles are decoded. Default: true.
    pub fn decode_entities(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }

    /// Add a redirect edge. Returns false when either title normalizes to
    /// nothing or the edge points at itself.
    pub fn add_redirect(&mut self, source: &str, target: &str) -> bool {
        let (Some(source), Some(target)) = (self.title_key(source), self.title_key(target)) else {
            return false;
        };
        if source == target {
            return false;
        }
        self.redirects.insert(source, target);
        true
    }

    /// Attach `entity` to `title`. The first identifier seen for a title wins.
    pub fn add_entity(&mut self, entity: &str, title: &str) -> bool {
        let entity = entity.trim();
        if entity.is_empty() {
            return false;
        }
        let Some(title) = self.title_key(title) else {
            return false;
        };
        if self.entities.contains(title) {
            return false;
        }
        let id = EntityId::new(self.interner.intern_or_get(entity));
        self.entities.insert(title, id);
        true
    }

    /// Read a redirect file (plain or gzip).
    pub fn load_redirects(
        &mut self,
        path: &Path,
        events: &EventDispatcher,
    ) -> Result<LoadSummary, LoadError> {
        let reader = loaders::open_input(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let summary =
            loaders::read_redirects(reader, path, |source, target| self.add_redirect(source, target))?;
        report_load(path, summary, events);
        Ok(summary)
    }

    /// Read an entity file (plain or gzip), keyed by the `site` column.
    pub fn load_entities(
        &mut self,
        path: &Path,
        site: &str,
        excluded_classes: &[String],
        events: &EventDispatcher,
    ) -> Result<LoadSummary, LoadError> {
        let reader = loaders::open_input(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let summary = loaders::read_entities(reader, path, site, excluded_classes, |id, title| {
            self.add_entity(id, title)
        })?;
        report_load(path, summary, events);
        Ok(summary)
    }

    /// Freeze the interner, close redirect chains and propagate entity
    /// identifiers through them.
    pub fn build(self, events: &EventDispatcher) -> KnowledgeBase {
        let interner = self.interner.freeze();
        let mut redirects = self.redirects;
        let mut entities = self.entities;

        let closure = close_redirects(&mut redirects, &interner, events);
        let propagation = propagate_entities(&redirects, &mut entities, &interner);
        tracing::info!(
            redirects = closure.edges,
            rewritten = closure.rewritten,
            cycles = closure.cycles,
            entities = entities.len(),
            propagated = propagation.total(),
            "redirect closure complete"
        );
        events.emit_closure_complete(&ClosureCompleteEvent {
            edges: closure.edges,
            cycles: closure.cycles,
            entities_propagated: propagation.total(),
        });

        KnowledgeBase {
            interner,
            redirects,
            entities,
            decode_entities: self.decode_entities,
        }
    }

    fn title_key(&mut self, raw: &str) -> Option<TitleId> {
        let decoded = if self.decode_entities {
            decode_entities(raw)
        } else {
            Cow::Borrowed(raw)
        };
        let title = normalize_title(&decoded)?;
        Some(TitleId::new(self.interner.intern_or_get(&title)))
    }
}

impl Default for KnowledgeBaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn report_load(path: &Path, summary: LoadSummary, events: &EventDispatcher) {
    tracing::info!(
        path = %path.display(),
        records = summary.records,
        skipped = summary.skipped,
        "loaded"
    );
    events.emit_load_complete(&LoadCompleteEvent {
        source: path.to_path_buf(),
        records: summary.records,
        skipped: summary.skipped,
    });
}

/// Closed redirects and entity identifiers over a frozen interner.
pub struct KnowledgeBase {
    interner: FrozenInterner,
    redirects: RedirectMap,
    entities: EntityMap,
    decode_entities: bool,
}

impl KnowledgeBase {
    /// Entity identifier of a link target, directly or through its redirect.
    /// Targets not found verbatim are retried in the form titles were
    /// loaded in: decoded when decoding is on, then normalized.
    pub fn resolve_target(&self, target: &str) -> Option<EntityId> {
        if let Some(id) = self.lookup(target) {
            return Some(id);
        }
        let decoded = if self.decode_entities {
            decode_entities(target)
        } else {
            Cow::Borrowed(target)
        };
        let normalized = normalize_title(&decoded)?;
        if normalized == target {
            return None;
        }
        self.lookup(&normalized)
    }

    pub fn entity_name(&self, entity: EntityId) -> &str {
        self.interner.resolve(&entity.inner())
    }

    pub fn title(&self, title: TitleId) -> &str {
        self.interner.resolve(&title.inner())
    }

    pub fn interner(&self) -> &FrozenInterner {
        &self.interner
    }

    pub fn redirects(&self) -> &RedirectMap {
        &self.redirects
    }

    pub fn entities(&self) -> &EntityMap {
        &self.entities
    }

    fn lookup(&self, title: &str) -> Option<EntityId> {
        let title = TitleId::new(self.interner.get(title)?);
        self.entities
            .get(title)
            .or_else(|| self.entities.get(self.redirects.resolve(title)))
    }
}
