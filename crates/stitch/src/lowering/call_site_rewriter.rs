use log::trace;
use oxc::{
  ast::ast::{Argument, CallExpression, Expression},
  ast_visit::{VisitMut, walk_mut},
};
use stitch_ecmascript_utils::{AstSnippet, ExpressionExt};

use super::module_context::ModuleContext;

/// Points `include(..)`, `window.include(..)` and `import(..)` calls at canonical urls.
///
/// - `include("./a.js")` keeps its shape, only the literal changes.
/// - `import("./a.js")` becomes `window.include("/a.js")`.
///
/// Computed specifiers and imports with options are left alone.
pub struct CallSiteRewriter<'me, 'ctx, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  ctx: &'me mut ModuleContext<'ctx>,
  errors: Vec<anyhow::Error>,
}

impl<'me, 'ctx, 'ast> CallSiteRewriter<'me, 'ctx, 'ast> {
  pub fn new(snippet: &'me AstSnippet<'ast>, ctx: &'me mut ModuleContext<'ctx>) -> Self {
    Self { snippet, ctx, errors: vec![] }
  }

  pub fn into_errors(self) -> Vec<anyhow::Error> {
    self.errors
  }

  fn rewrite_include_call(&mut self, call: &mut CallExpression<'ast>) {
    if call.arguments.len() != 1 || !call.callee.is_include_callee() {
      return;
    }
    let Argument::StringLiteral(literal) = &mut call.arguments[0] else {
      return;
    };

    match self.ctx.require(&literal.value) {
      Ok(url) => {
        trace!("{}: include({:?}) -> include({:?})", self.ctx.url, literal.value.as_str(), url);
        literal.value = self.snippet.atom(&url);
        literal.raw = None;
      }
      Err(err) => self.errors.push(err.into()),
    }
  }
}

impl<'ast> VisitMut<'ast> for CallSiteRewriter<'_, '_, 'ast> {
  fn visit_expression(&mut self, expr: &mut Expression<'ast>) {
    match expr {
      Expression::ImportExpression(import_expr) if import_expr.options.is_none() => {
        if let Some(literal) = import_expr.source.as_string_literal() {
          let specifier = literal.value;
          match self.ctx.require(&specifier) {
            Ok(url) => {
              trace!(
                "{}: import({:?}) -> window.include({:?})",
                self.ctx.url,
                specifier.as_str(),
                url
              );
              *expr = self.snippet.window_include_call_expr(&url);
              return;
            }
            Err(err) => self.errors.push(err.into()),
          }
        }
      }
      Expression::CallExpression(call) => self.rewrite_include_call(call),
      _ => {}
    }

    walk_mut::walk_expression(self, expr);
  }
}

#[cfg(test)]
mod tests {
  use oxc::{allocator::Allocator, ast_visit::VisitMut, codegen::Codegen, span::SourceType};
  use stitch_ecmascript::EcmaCompiler;
  use stitch_ecmascript_utils::AstSnippet;
  use stitch_error::BundleError;

  use super::CallSiteRewriter;
  use crate::{graph::ModuleGraph, lowering::module_context::ModuleContext};

  fn rewrite(graph: &mut ModuleGraph, url: &str, source: &str) -> (String, Vec<anyhow::Error>) {
    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let mut program =
      EcmaCompiler::parse_program(&allocator, url, source, SourceType::mjs()).unwrap();
    let idx = graph.get_or_create(url);
    let mut ctx = ModuleContext::new(graph, idx);
    let mut rewriter = CallSiteRewriter::new(&snippet, &mut ctx);
    rewriter.visit_program(&mut program);
    let errors = rewriter.into_errors();
    (Codegen::new().build(&program).code, errors)
  }

  #[test]
  fn include_literals_become_canonical() {
    let mut graph = ModuleGraph::new();
    let (code, errors) = rewrite(
      &mut graph,
      "/src/main.js",
      "include('./a.js'); window.include('../b.js'); other('./c.js'); include('./d.js', true);",
    );

    assert!(errors.is_empty());
    assert_eq!(
      code,
      "include(\"/src/a.js\");\nwindow.include(\"/b.js\");\nother(\"./c.js\");\ninclude(\"./d.js\", true);\n"
    );
    assert!(graph.get("/src/a.js").is_some());
    assert!(graph.get("/b.js").is_some());
    assert!(graph.get("/src/c.js").is_none());
  }

  #[test]
  fn dynamic_imports_become_window_include() {
    let mut graph = ModuleGraph::new();
    let (code, errors) = rewrite(
      &mut graph,
      "/main.js",
      "const a = () => import('./a.js');\nimport(name);\nimport('./b.js', { with: {} });",
    );

    assert!(errors.is_empty());
    assert!(code.contains("window.include(\"/a.js\")"), "{code}");
    assert!(code.contains("import(name)"), "{code}");
    assert!(code.contains("import(\"./b.js\""), "{code}");
    assert!(graph.get("/b.js").is_none());
  }

  #[test]
  fn nested_calls_are_visited() {
    let mut graph = ModuleGraph::new();
    let (code, _) =
      rewrite(&mut graph, "/main.js", "f(async () => { await include(include('./a.js') && './b.js'); });");

    assert!(code.contains("include(\"/a.js\")"), "{code}");
  }

  #[test]
  fn cycles_are_reported_after_the_walk() {
    let mut graph = ModuleGraph::new();
    let (_, errors) = rewrite(&mut graph, "/main.js", "import('./main.js'); include('./a.js');");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
      errors[0].downcast_ref::<BundleError>(),
      Some(BundleError::CircularImport { .. })
    ));
    assert!(graph.get("/a.js").is_some());
  }
}
