//! String interning for titles and entity identifiers.
//!
//! The load phase is single-threaded, so building uses a plain
//! `lasso::Rodeo`. Once loading is done the interner is frozen into a
//! `lasso::RodeoReader`, which is `Sync` and read without locks by every
//! scoring worker.

use lasso::{Capacity, Rodeo, RodeoReader, Spur};

/// Build-phase interner. Equal content always yields the same `Spur`, and
/// the `&str` resolved from it is the same arena slice.
pub struct TitleInterner {
    inner: Rodeo,
}

impl TitleInterner {
    /// Create a new, empty interner.
    pub fn new() -> Self {
        Self {
            inner: Rodeo::new(),
        }
    }

    /// Create an interner pre-sized for `strings` entries.
    pub fn with_capacity(strings: usize) -> Self {
        Self {
            inner: Rodeo::with_capacity(Capacity::for_strings(strings)),
        }
    }

    /// Return the canonical key for `value`, inserting it if unseen.
    pub fn intern_or_get(&mut self, value: &str) -> Spur {
        self.inner.get_or_intern(value)
    }

    /// Look up a previously interned value without inserting.
    pub fn get(&self, value: &str) -> Option<Spur> {
        self.inner.get(value)
    }

    /// Resolve a `Spur` back to its string.
    pub fn resolve(&self, key: &Spur) -> &str {
        self.inner.resolve(key)
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Freeze into a read-only interner for the concurrent phase.
    pub fn freeze(self) -> FrozenInterner {
        FrozenInterner {
            inner: self.inner.into_reader(),
        }
    }
}

impl Default for TitleInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only interner shared by all workers.
pub struct FrozenInterner {
    inner: RodeoReader,
}

impl FrozenInterner {
    /// Look up a value. Strings that were never interned return `None`.
    pub fn get(&self, value: &str) -> Option<Spur> {
        self.inner.get(value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.inner.contains(value)
    }

    /// Resolve a `Spur` back to its string.
    pub fn resolve(&self, key: &Spur) -> &str {
        self.inner.resolve(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
