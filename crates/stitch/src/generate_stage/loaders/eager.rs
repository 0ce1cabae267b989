use itertools::Itertools;
use oxc::span::SPAN;
use stitch_ecmascript_utils::AstSnippet;
use stitch_error::BuildResult;

use super::{LoaderGenerator, LoaderInput, LoaderOutput, module_entries, page_load};

const PRELUDE: &str = include_str!("../../runtime/eager.js");
const STARTUP: &str = include_str!("../../runtime/eager_startup.js");
const EMPTY: &str = include_str!("../../runtime/eager_empty.js");

/// Runs every module synchronously at startup into a frozen table of accessor objects.
///
/// `include(url)` answers from the table without waiting. Only statically closed bundles see
/// every module there, so references left to the runtime fall back to `import()`.
pub struct EagerLoader;

impl LoaderGenerator for EagerLoader {
  fn generate<'ast>(
    &self,
    snippet: &AstSnippet<'ast>,
    input: LoaderInput<'ast>,
  ) -> BuildResult<LoaderOutput<'ast>> {
    if input.modules.is_empty() {
      let statements = snippet.statements(&EMPTY.replace("__PAGE_LOAD__", page_load()))?;
      return Ok(LoaderOutput { statements, warnings: vec![] });
    }

    let mut warnings = vec![];
    let include = if input.not_needed.is_empty() {
      "(url) => table[url]"
    } else {
      warnings.push(anyhow::anyhow!(
        "Eager bundle is not self-contained, `include` falls back to `import()` for {}",
        input.not_needed.iter().join(", ")
      ));
      "(url) => table[url] ?? import(url)"
    };

    let prelude = PRELUDE.replace("__PAGE_LOAD__", page_load()).replace("__INCLUDE__", include);
    let mut body = snippet.statements(&prelude)?;
    body.extend(module_entries(snippet, input.modules, false)?);
    body.extend(snippet.statements(STARTUP)?);

    let statements = snippet.builder.vec1(snippet.builder.statement_block(SPAN, body));
    Ok(LoaderOutput { statements, warnings })
  }
}
