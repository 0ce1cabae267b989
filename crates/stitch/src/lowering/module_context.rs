use arcstr::ArcStr;
use log::trace;
use stitch_common::{ExportedBinding, ModuleIdx};
use stitch_error::BundleError;

use crate::graph::ModuleGraph;

/// The module being lowered, together with the graph it adds edges to.
pub struct ModuleContext<'a> {
  pub graph: &'a mut ModuleGraph,
  pub idx: ModuleIdx,
  pub url: ArcStr,
}

impl<'a> ModuleContext<'a> {
  pub fn new(graph: &'a mut ModuleGraph, idx: ModuleIdx) -> Self {
    let url = graph[idx].url.clone();
    Self { graph, idx, url }
  }

  /// Resolves `specifier` against this module and records the dependency.
  ///
  /// Returns the canonical url of the dependency. Requiring the same module twice is fine.
  pub fn require(&mut self, specifier: &str) -> Result<ArcStr, BundleError> {
    let url = stitch_resolver::resolve(&self.url, specifier);
    let dep = self.graph.get_or_create(&url);
    if self.graph.add_edge(self.idx, dep)? {
      trace!("{} requires {}", self.url, url);
    }
    Ok(self.graph[dep].url.clone())
  }

  pub fn export(&mut self, name: impl Into<String>, binding: ExportedBinding) {
    self.graph[self.idx].exports.insert(name.into(), binding);
  }
}
