mod loaders;

use arcstr::ArcStr;
use log::{debug, warn};
use oxc::{allocator::Allocator, ast::ast::Program, span::SourceType};
use stitch_common::NormalizedBundlerOptions;
use stitch_ecmascript::EcmaCompiler;
use stitch_ecmascript_utils::AstSnippet;
use stitch_error::BuildResult;

use self::loaders::{LoaderInput, LoaderOutput, ModuleThunk, loader_for};
use crate::{graph::ModuleState, scan_stage::ScanStageOutput};

pub struct GenerateStageOutput<'ast> {
  pub program: Program<'ast>,
  /// Bundled urls in emission order.
  pub modules: Vec<ArcStr>,
  pub warnings: Vec<anyhow::Error>,
}

pub struct GenerateStage<'a, 'ast> {
  options: &'a NormalizedBundlerOptions,
  snippet: AstSnippet<'ast>,
}

impl<'a, 'ast> GenerateStage<'a, 'ast> {
  pub fn new(options: &'a NormalizedBundlerOptions, allocator: &'ast Allocator) -> Self {
    Self { options, snippet: AstSnippet::new(allocator) }
  }

  pub fn generate(
    &self,
    scan_output: ScanStageOutput<'ast>,
  ) -> BuildResult<GenerateStageOutput<'ast>> {
    let ScanStageOutput { mut graph, entries, mut bodies } = scan_output;

    let mut modules = vec![];
    for idx in graph.emit_order(&entries) {
      if let Some(body) = bodies.remove(&idx) {
        modules.push(ModuleThunk { url: graph[idx].url.clone(), body });
      }
    }
    let not_needed = graph
      .modules()
      .filter(|module| module.state == ModuleState::NotNeeded)
      .map(|module| module.url.clone())
      .collect();

    let urls = modules.iter().map(|module| module.url.clone()).collect::<Vec<_>>();
    let input = LoaderInput { modules, not_needed };
    let LoaderOutput { statements, warnings } =
      loader_for(self.options.loader).generate(&self.snippet, input)?;
    for warning in &warnings {
      warn!("{warning}");
    }

    let mut program =
      EcmaCompiler::parse_program(self.snippet.alloc(), "<bundle>", "", SourceType::mjs())?;
    program.body = statements;
    debug!("Assembled {} modules with the {:?} loader", urls.len(), self.options.loader);

    Ok(GenerateStageOutput { program, modules: urls, warnings })
  }
}
