use itertools::Itertools;
use log::debug;
use oxc::{
  allocator::{Allocator, Vec as ArenaVec},
  ast::ast::Statement,
  span::SourceType,
};
use rustc_hash::FxHashMap;
use stitch_common::{LoadOutcome, ModuleIdx, ModuleLoader, NormalizedBundlerOptions};
use stitch_ecmascript::EcmaCompiler;
use stitch_ecmascript_utils::AstSnippet;
use stitch_error::BuildResult;

use crate::{
  compactor::compact,
  graph::{ModuleGraph, ModuleState},
  lowering::{ModuleContext, lower_module},
};

pub struct ScanStageOutput<'ast> {
  pub graph: ModuleGraph,
  /// Deduplicated, in input order.
  pub entries: Vec<ModuleIdx>,
  /// Lowered and compacted bodies of the loaded modules.
  pub bodies: FxHashMap<ModuleIdx, ArenaVec<'ast, Statement<'ast>>>,
}

pub struct ScanStage<'a, 'ast> {
  options: &'a NormalizedBundlerOptions,
  loader: &'a dyn ModuleLoader,
  snippet: AstSnippet<'ast>,
}

impl<'a, 'ast> ScanStage<'a, 'ast> {
  pub fn new(
    options: &'a NormalizedBundlerOptions,
    loader: &'a dyn ModuleLoader,
    allocator: &'ast Allocator,
  ) -> Self {
    Self { options, loader, snippet: AstSnippet::new(allocator) }
  }

  /// Loads every module reachable from the entries, first come first served.
  pub fn scan(&self) -> BuildResult<ScanStageOutput<'ast>> {
    let mut graph = ModuleGraph::new();
    let entries = self
      .options
      .input
      .iter()
      .map(|item| {
        graph.get_or_create(&stitch_resolver::resolve_entry(&self.options.base, &item.import))
      })
      .unique()
      .collect::<Vec<_>>();

    let mut bodies = FxHashMap::default();
    while let Some(idx) = graph.next_pending() {
      let url = graph[idx].url.clone();

      let outcome = if self.options.is_external(&url) {
        LoadOutcome::NotNeeded
      } else {
        self.loader.load(&url)?
      };
      let source = match outcome {
        LoadOutcome::Loaded(source) => source,
        LoadOutcome::NotNeeded => {
          let importers =
            graph[idx].required_by.iter().map(|&by| graph[by].url.as_str()).join(", ");
          debug!("Skipped {url} (required by {importers}), it is left to the runtime");
          graph[idx].state = ModuleState::NotNeeded;
          continue;
        }
      };

      let program =
        EcmaCompiler::parse_program(self.snippet.alloc(), &url, &source, SourceType::mjs())?;
      let ctx = ModuleContext::new(&mut graph, idx);
      let body = lower_module(&self.snippet, ctx, self.options, program.body)?;
      bodies.insert(idx, compact(&self.snippet, body));
      graph[idx].state = ModuleState::Loaded;
      debug!("Loaded {url} ({} bytes)", source.len());
    }

    Ok(ScanStageOutput { graph, entries, bodies })
  }
}
