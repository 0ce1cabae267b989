use oxc::span::SPAN;
use stitch_ecmascript_utils::AstSnippet;
use stitch_error::BuildResult;

use super::{LoaderGenerator, LoaderInput, LoaderOutput, module_entries, page_load};

const PRELUDE: &str = include_str!("../../runtime/lazy.js");
const STARTUP: &str = include_str!("../../runtime/lazy_startup.js");

/// Registers async thunks and drains them in order. Urls that never got registered are loaded
/// with a native `import()` relative to the bundle script.
pub struct LazyLoader;

impl LoaderGenerator for LazyLoader {
  fn generate<'ast>(
    &self,
    snippet: &AstSnippet<'ast>,
    input: LoaderInput<'ast>,
  ) -> BuildResult<LoaderOutput<'ast>> {
    let mut body = snippet.statements(&PRELUDE.replace("__PAGE_LOAD__", page_load()))?;
    body.extend(module_entries(snippet, input.modules, true)?);
    body.extend(snippet.statements(STARTUP)?);

    let statements = snippet.builder.vec1(snippet.builder.statement_block(SPAN, body));
    Ok(LoaderOutput { statements, warnings: vec![] })
  }
}
