//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for candidate seed lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec sized for redirect walk paths (usually <8).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
