use std::{
  collections::VecDeque,
  ops::{Index, IndexMut},
};

use arcstr::ArcStr;
use oxc_index::IndexVec;
use rustc_hash::{FxHashMap, FxHashSet};
use stitch_common::{ExportedBinding, ModuleIdx};
use stitch_error::BundleError;
use stitch_utils::indexmap::{FxIndexMap, FxIndexSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
  /// Discovered, waiting in the queue.
  Pending,
  Loaded,
  /// Referenced, but provided at runtime by something other than the bundle.
  NotNeeded,
}

#[derive(Debug)]
pub struct ModuleNode {
  pub idx: ModuleIdx,
  pub url: ArcStr,
  pub state: ModuleState,
  pub requires: FxIndexSet<ModuleIdx>,
  /// Inverse of `requires`, for diagnostics only.
  pub required_by: FxIndexSet<ModuleIdx>,
  pub emitted: bool,
  /// External name -> binding, in publication order.
  pub exports: FxIndexMap<String, ExportedBinding>,
}

impl ModuleNode {
  fn new(idx: ModuleIdx, url: ArcStr) -> Self {
    Self {
      idx,
      url,
      state: ModuleState::Pending,
      requires: FxIndexSet::default(),
      required_by: FxIndexSet::default(),
      emitted: false,
      exports: FxIndexMap::default(),
    }
  }
}

/// Append-only module graph of one bundling run.
///
/// Every url owns exactly one node. New nodes are queued once and handed out in FIFO order by
/// [`ModuleGraph::next_pending`].
#[derive(Debug, Default)]
pub struct ModuleGraph {
  modules: IndexVec<ModuleIdx, ModuleNode>,
  visited: FxHashMap<ArcStr, ModuleIdx>,
  queue: VecDeque<ModuleIdx>,
}

#[derive(PartialEq, Eq, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl ModuleGraph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  pub fn modules(&self) -> impl Iterator<Item = &ModuleNode> {
    self.modules.iter()
  }

  pub fn get(&self, url: &str) -> Option<ModuleIdx> {
    self.visited.get(url).copied()
  }

  pub fn get_or_create(&mut self, url: &str) -> ModuleIdx {
    if let Some(idx) = self.get(url) {
      return idx;
    }
    let url = ArcStr::from(url);
    let idx = self.modules.next_idx();
    self.modules.push(ModuleNode::new(idx, url.clone()));
    self.visited.insert(url, idx);
    self.queue.push_back(idx);
    idx
  }

  pub fn next_pending(&mut self) -> Option<ModuleIdx> {
    self.queue.pop_front()
  }

  /// Records that `from` requires `to`.
  ///
  /// Returns `Ok(false)` when the edge already exists. An edge that would make `from` depend on
  /// itself, directly or transitively, is rejected with [`BundleError::CircularImport`].
  pub fn add_edge(&mut self, from: ModuleIdx, to: ModuleIdx) -> Result<bool, BundleError> {
    if self.modules[from].requires.contains(&to) {
      return Ok(false);
    }

    if let Some(path) = self.find_path(to, from) {
      let chain = std::iter::once(from)
        .chain(path)
        .map(|idx| self.modules[idx].url.to_string())
        .collect::<Vec<_>>();
      return Err(BundleError::CircularImport { chain });
    }

    self.modules[from].requires.insert(to);
    self.modules[to].required_by.insert(from);
    Ok(true)
  }

  /// Path of `requires` edges leading from `start` to `target`, both included.
  fn find_path(&self, start: ModuleIdx, target: ModuleIdx) -> Option<Vec<ModuleIdx>> {
    if start == target {
      return Some(vec![start]);
    }

    let mut parents = FxHashMap::default();
    let mut seen = FxHashSet::from_iter([start]);
    let mut stack = vec![start];

    while let Some(idx) = stack.pop() {
      for &dep in self.modules[idx].requires.iter().rev() {
        if !seen.insert(dep) {
          continue;
        }
        parents.insert(dep, idx);
        if dep == target {
          let mut path = vec![target];
          let mut cursor = target;
          while let Some(&parent) = parents.get(&cursor) {
            path.push(parent);
            cursor = parent;
          }
          path.reverse();
          return Some(path);
        }
        stack.push(dep);
      }
    }

    None
  }

  /// Post-order walk from `entries`: every module comes after all of its requirements. Modules are
  /// marked `emitted` as they are appended, and already emitted modules are skipped.
  pub fn emit_order(&mut self, entries: &[ModuleIdx]) -> Vec<ModuleIdx> {
    let mut execution_stack =
      entries.iter().rev().map(|&idx| Status::ToBeExecuted(idx)).collect::<Vec<_>>();
    let mut entered = FxHashSet::default();
    let mut sorted = Vec::with_capacity(self.modules.len());

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(idx) => {
          if self.modules[idx].emitted || !entered.insert(idx) {
            continue;
          }
          execution_stack.push(Status::WaitForExit(idx));
          execution_stack
            .extend(self.modules[idx].requires.iter().rev().map(|&dep| Status::ToBeExecuted(dep)));
        }
        Status::WaitForExit(idx) => {
          self.modules[idx].emitted = true;
          sorted.push(idx);
        }
      }
    }

    sorted
  }
}

impl Index<ModuleIdx> for ModuleGraph {
  type Output = ModuleNode;

  fn index(&self, index: ModuleIdx) -> &Self::Output {
    &self.modules[index]
  }
}

impl IndexMut<ModuleIdx> for ModuleGraph {
  fn index_mut(&mut self, index: ModuleIdx) -> &mut Self::Output {
    &mut self.modules[index]
  }
}
