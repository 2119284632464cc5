//! Data structures and string interning for entmine.
//! FxHashMap, SmallVec, lasso-based interning, Spur-based ID types.

pub mod collections;
pub mod identifiers;
pub mod interning;

pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::{EntityId, TitleId};
pub use interning::{FrozenInterner, TitleInterner};
