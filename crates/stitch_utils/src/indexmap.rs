use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Insertion-ordered set. Iteration order is part of the bundle output, so prefer this over `FxHashSet`
/// whenever the contents are walked.
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
/// Insertion-ordered map, see [`FxIndexSet`].
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
