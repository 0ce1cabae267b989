mod eager;
mod lazy;

use arcstr::ArcStr;
use oxc::{allocator::Vec as ArenaVec, ast::ast::Statement};
use stitch_common::LoaderStrategy;
use stitch_ecmascript_utils::{AstSnippet, TemplateFiller};
use stitch_error::BuildResult;
use stitch_utils::{concat_string, ecmascript::quote_str};

pub use self::{eager::EagerLoader, lazy::LazyLoader};

const PAGE_LOAD: &str = include_str!("../../runtime/page_load.js");

/// A bundled module, ready to become a thunk.
pub struct ModuleThunk<'ast> {
  pub url: ArcStr,
  pub body: ArenaVec<'ast, Statement<'ast>>,
}

pub struct LoaderInput<'ast> {
  /// In emission order.
  pub modules: Vec<ModuleThunk<'ast>>,
  /// Referenced urls that the bundle leaves to the runtime.
  pub not_needed: Vec<ArcStr>,
}

pub struct LoaderOutput<'ast> {
  pub statements: ArenaVec<'ast, Statement<'ast>>,
  pub warnings: Vec<anyhow::Error>,
}

/// Emits the runtime that registers the bundled modules and defines `window.include`.
pub trait LoaderGenerator {
  fn generate<'ast>(
    &self,
    snippet: &AstSnippet<'ast>,
    input: LoaderInput<'ast>,
  ) -> BuildResult<LoaderOutput<'ast>>;
}

pub fn loader_for(strategy: LoaderStrategy) -> &'static dyn LoaderGenerator {
  match strategy {
    LoaderStrategy::Eager => &EagerLoader,
    LoaderStrategy::Lazy => &LazyLoader,
  }
}

/// Expression resolving once the page has finished loading.
fn page_load() -> &'static str {
  PAGE_LOAD.trim_end()
}

/// `modules.push(["<url>", function* () { "use strict"; <body> }]);` per module.
///
/// The bundle is a classic script, so each thunk opts back into the strict mode of modules.
fn module_entries<'ast>(
  snippet: &AstSnippet<'ast>,
  modules: Vec<ModuleThunk<'ast>>,
  is_async: bool,
) -> BuildResult<ArenaVec<'ast, Statement<'ast>>> {
  let thunk = if is_async {
    r#"async function* () { "use strict"; }"#
  } else {
    r#"function* () { "use strict"; }"#
  };
  let mut entries = snippet.builder.vec_with_capacity(modules.len());
  for ModuleThunk { url, body } in modules {
    let code = concat_string!("modules.push([", quote_str(&url), ", ", thunk, "]);");
    let mut entry = snippet.statements(&code)?;
    TemplateFiller::with_body(body).fill_statements(&mut entry);
    entries.extend(entry);
  }
  Ok(entries)
}
