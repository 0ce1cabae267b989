mod call_site_rewriter;
mod import_group;
mod module_context;
mod publication;
mod top_level_scan;

use arcstr::ArcStr;
use oxc::{
  allocator::{Box as ArenaBox, TakeIn, Vec as ArenaVec},
  ast::{
    ast::{
      ClassType, ExportAllDeclaration, ExportDefaultDeclarationKind,
      ExportNamedDeclaration, Expression, FunctionType, ImportDeclaration,
      ImportDeclarationSpecifier, Statement,
    },
    match_expression,
  },
  ast_visit::VisitMut,
};
use rustc_hash::FxHashSet;
use stitch_common::{ExportTarget, ExportedBinding, LoaderStrategy, NormalizedBundlerOptions};
use stitch_ecmascript_utils::{AstSnippet, DeclarationExt};
use stitch_error::{BuildError, BuildResult, BundleError};
use stitch_utils::indexmap::FxIndexMap;

pub use self::module_context::ModuleContext;
use self::{
  call_site_rewriter::CallSiteRewriter,
  import_group::ImportGroup,
  publication::{DEFAULT_PLACEHOLDER, Descriptor},
  top_level_scan::TopLevelScan,
};

/// Turns the top-level body of a module into the body of its thunk.
///
/// Imports are hoisted to the top, one `const` per dependency. `export * from` passthroughs come
/// next so that local exports published later take precedence. Everything else keeps its order.
///
/// Eager thunks are plain generators, so a module that awaits at the top level is rejected.
pub fn lower_module<'ast>(
  snippet: &AstSnippet<'ast>,
  ctx: ModuleContext<'_>,
  options: &NormalizedBundlerOptions,
  body: ArenaVec<'ast, Statement<'ast>>,
) -> BuildResult<ArenaVec<'ast, Statement<'ast>>> {
  let scan = TopLevelScan::new(&body);
  if scan.has_await && options.loader == LoaderStrategy::Eager {
    return Err(BundleError::TopLevelAwait { url: ctx.url.to_string() }.into());
  }

  let mut lowering = Lowering {
    snippet,
    ctx,
    strategy: options.loader,
    bare: options.bare,
    mutable_bindings: scan.mutable_bindings,
    imports: FxIndexMap::default(),
    passthroughs: snippet.builder.vec(),
    body: snippet.builder.vec_with_capacity(body.len()),
    errors: vec![],
  };

  for stmt in body {
    lowering.lower_statement(stmt)?;
  }

  lowering.finish()
}

struct Lowering<'me, 'ctx, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  ctx: ModuleContext<'ctx>,
  strategy: LoaderStrategy,
  bare: bool,
  mutable_bindings: FxHashSet<&'ast str>,
  imports: FxIndexMap<ArcStr, ImportGroup>,
  passthroughs: ArenaVec<'ast, Statement<'ast>>,
  body: ArenaVec<'ast, Statement<'ast>>,
  errors: Vec<anyhow::Error>,
}

impl<'ast> Lowering<'_, '_, 'ast> {
  fn lower_statement(&mut self, mut stmt: Statement<'ast>) -> BuildResult<()> {
    match &mut stmt {
      Statement::ImportDeclaration(decl) => return self.lower_import(decl),
      Statement::ExportNamedDeclaration(decl) => return self.lower_export_named(decl),
      Statement::ExportDefaultDeclaration(decl) => {
        return self.lower_export_default(&mut decl.declaration);
      }
      Statement::ExportAllDeclaration(decl) => return self.lower_export_all(decl),
      _ => {}
    }
    self.keep(stmt);
    Ok(())
  }

  fn finish(self) -> BuildResult<ArenaVec<'ast, Statement<'ast>>> {
    if !self.errors.is_empty() {
      return Err(BuildError::from(self.errors));
    }

    let mut statements = self.snippet.builder.vec_with_capacity(
      self.imports.len() + self.passthroughs.len() + self.body.len(),
    );
    for (url, group) in &self.imports {
      let code = group.render(&publication::include_call(self.strategy, url));
      statements.extend(self.snippet.generator_statements(&code)?);
    }
    statements.extend(self.passthroughs);
    statements.extend(self.body);
    Ok(statements)
  }

  /// Keeps a statement of the module itself, with its call sites rewritten.
  fn keep(&mut self, mut stmt: Statement<'ast>) {
    let mut rewriter = CallSiteRewriter::new(self.snippet, &mut self.ctx);
    rewriter.visit_statement(&mut stmt);
    self.errors.extend(rewriter.into_errors());
    self.body.push(stmt);
  }

  fn publish<'a>(
    &mut self,
    descriptors: impl IntoIterator<Item = (&'a str, Descriptor<'a>)>,
  ) -> BuildResult<()> {
    if self.bare {
      return Ok(());
    }
    let mut descriptors = descriptors.into_iter().peekable();
    if descriptors.peek().is_none() {
      return Ok(());
    }
    let code = publication::publish(descriptors);
    self.body.extend(self.snippet.generator_statements(&code)?);
    Ok(())
  }

  fn lower_import(&mut self, decl: &ImportDeclaration<'ast>) -> BuildResult<()> {
    if decl.import_kind.is_type() {
      return Ok(());
    }

    let url = self.ctx.require(&decl.source.value)?;
    let group = self.imports.entry(url).or_default();
    let Some(specifiers) = &decl.specifiers else {
      return Ok(());
    };
    for specifier in specifiers.iter() {
      match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(spec) => {
          if !spec.import_kind.is_type() {
            group.add_named(spec.imported.name().as_str(), spec.local.name.as_str());
          }
        }
        ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
          group.add_named("default", spec.local.name.as_str());
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
          group.add_namespace(spec.local.name.as_str());
        }
      }
    }
    Ok(())
  }

  fn lower_export_named(&mut self, decl: &mut ExportNamedDeclaration<'ast>) -> BuildResult<()> {
    if decl.export_kind.is_type() {
      return Ok(());
    }

    // `export let a = 1, {b} = c;`
    if let Some(declaration) = &mut decl.declaration {
      if declaration.is_typescript_syntax() {
        return Ok(());
      }
      let names = declaration.declared_names();
      let writable = declaration.is_mutable_binding();
      self.keep(Statement::from(declaration.take_in(self.snippet.alloc())));

      for name in &names {
        self.ctx.export(name.as_str(), ExportedBinding::local(name.as_str(), writable));
      }
      return self.publish(names.iter().map(|name| {
        (name.as_str(), Descriptor::Binding { local: name.as_str(), writable })
      }));
    }

    // `export { a as b } from "./x.js";`
    if let Some(source) = &decl.source {
      let url = self.ctx.require(&source.value)?;
      self.imports.entry(url.clone()).or_default();

      let specifiers = decl.specifiers.iter().filter(|spec| !spec.export_kind.is_type());
      for specifier in specifiers.clone() {
        let name = specifier.local.name().to_string();
        let target = ExportTarget::Reexport { url: url.clone(), name };
        self.ctx.export(specifier.exported.name().as_str(), ExportedBinding::immutable(target));
      }
      if self.bare {
        return Ok(());
      }

      let dependency = self.bind_dependency(url);
      return self.publish(specifiers.map(|specifier| {
        let getter = publication::reexport_getter(&dependency, &specifier.local.name());
        (specifier.exported.name().as_str(), getter)
      }));
    }

    // `export { a, b as c };`
    let mut descriptors = vec![];
    for specifier in decl.specifiers.iter().filter(|spec| !spec.export_kind.is_type()) {
      let local = specifier.local.name().as_str();
      let exported = specifier.exported.name().as_str();
      let writable = self.mutable_bindings.contains(local);
      self.ctx.export(exported, ExportedBinding::local(local, writable));
      descriptors.push((exported, Descriptor::Binding { local, writable }));
    }
    self.publish(descriptors)
  }

  fn lower_export_default(
    &mut self,
    kind: &mut ExportDefaultDeclarationKind<'ast>,
  ) -> BuildResult<()> {
    let alloc = self.snippet.alloc();
    let mut expr = match kind {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        if let Some(name) = func.id.as_ref().map(|id| id.name.as_str()) {
          let func = ArenaBox::new_in(func.as_mut().take_in(alloc), alloc);
          return self.keep_named_default(name, Statement::FunctionDeclaration(func));
        }
        let mut func = func.as_mut().take_in(alloc);
        func.r#type = FunctionType::FunctionExpression;
        Expression::FunctionExpression(ArenaBox::new_in(func, alloc))
      }
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        if let Some(name) = class.id.as_ref().map(|id| id.name.as_str()) {
          let class = ArenaBox::new_in(class.as_mut().take_in(alloc), alloc);
          return self.keep_named_default(name, Statement::ClassDeclaration(class));
        }
        let mut class = class.as_mut().take_in(alloc);
        class.r#type = ClassType::ClassExpression;
        Expression::ClassExpression(ArenaBox::new_in(class, alloc))
      }
      ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => return Ok(()),
      kind @ match_expression!(ExportDefaultDeclarationKind) => {
        kind.to_expression_mut().take_in(alloc)
      }
    };

    let mut rewriter = CallSiteRewriter::new(self.snippet, &mut self.ctx);
    rewriter.visit_expression(&mut expr);
    self.errors.extend(rewriter.into_errors());

    self.ctx.export("default", ExportedBinding::immutable(ExportTarget::DefaultExpression));
    if self.bare {
      self.body.push(self.snippet.expr_stmt(expr));
      return Ok(());
    }

    let code =
      publication::publish([("default", Descriptor::Value(DEFAULT_PLACEHOLDER.to_string()))]);
    let statements = self.snippet.generator_statements_with(&code, DEFAULT_PLACEHOLDER, expr)?;
    self.body.extend(statements);
    Ok(())
  }

  /// `export default function name() {}` keeps the declaration, `default` reads the binding.
  fn keep_named_default(&mut self, name: &'ast str, stmt: Statement<'ast>) -> BuildResult<()> {
    self.keep(stmt);
    self.ctx.export("default", ExportedBinding::local(name, false));
    self.publish([("default", Descriptor::Binding { local: name, writable: false })])
  }

  fn lower_export_all(&mut self, decl: &ExportAllDeclaration<'ast>) -> BuildResult<()> {
    if decl.export_kind.is_type() {
      return Ok(());
    }

    let url = self.ctx.require(&decl.source.value)?;
    self.imports.entry(url.clone()).or_default();

    // `export * as ns from "./x.js";`
    if let Some(exported) = &decl.exported {
      let name = exported.name().as_str();
      let binding = ExportedBinding::immutable(ExportTarget::Namespace { url: url.clone() });
      self.ctx.export(name, binding);
      if self.bare {
        return Ok(());
      }
      let namespace = self.bind_dependency(url);
      return self.publish([(name, Descriptor::Value(namespace))]);
    }

    // `export * from "./x.js";`
    if !self.bare {
      let code = publication::star_passthrough(&self.bind_dependency(url));
      self.passthroughs.extend(self.snippet.generator_statements(&code)?);
    }
    Ok(())
  }

  /// Hidden local holding the exports of `url`, declared with the import group of `url`.
  ///
  /// Re-exports read it instead of calling `include` again, so they see the resolved exports
  /// object even when the dependency is loaded asynchronously.
  fn bind_dependency(&mut self, url: ArcStr) -> String {
    let entry = self.imports.entry(url);
    let index = entry.index();
    entry.or_default().bind(index).to_string()
  }
}

#[cfg(test)]
mod tests {
  use arcstr::ArcStr;
  use oxc::span::SourceType;
  use pretty_assertions::assert_eq;
  use stitch_common::{BundlerOptions, ExportTarget, ExportedBinding, LoaderStrategy};
  use stitch_ecmascript::EcmaCompiler;
  use stitch_ecmascript_utils::{AstSnippet, TemplateFiller};
  use stitch_error::BuildError;

  use super::{ModuleContext, lower_module};
  use crate::{graph::ModuleGraph, utils::normalize_options::normalize_options};

  /// Lowers `/main.js` and prints the result as the body of `async function* f() {}`.
  fn lower(source: &str, loader: LoaderStrategy, bare: bool) -> (String, ModuleGraph) {
    let options = normalize_options(BundlerOptions {
      cwd: Some("/".into()),
      loader: Some(loader),
      bare: Some(bare),
      ..Default::default()
    });
    let mut graph = ModuleGraph::new();
    let idx = graph.get_or_create("/main.js");

    let ast = EcmaCompiler::compose(SourceType::mjs(), |allocator| {
      let snippet = AstSnippet::new(allocator);
      let mut program =
        EcmaCompiler::parse_program(allocator, "/main.js", source, SourceType::mjs())?;
      let body = std::mem::replace(&mut program.body, snippet.builder.vec());
      let body = lower_module(&snippet, ModuleContext::new(&mut graph, idx), &options, body)?;

      let mut wrapper = snippet.statements("async function* f() {}")?;
      TemplateFiller::with_body(body).fill_statements(&mut wrapper);
      program.body = wrapper;
      Ok::<_, BuildError>(program)
    })
    .unwrap();

    (EcmaCompiler::print(&ast), graph)
  }

  #[test]
  fn imports_are_hoisted_before_passthroughs() {
    let (code, _) = lower(
      r#"
import { a } from "./dep.js";
console.log(a);
export * from "./star.js";
import "./side.js";
export let b = a;
"#,
      LoaderStrategy::Lazy,
      false,
    );

    let expected = r#"
async function* f() {
  const {a} = await include("/dep.js");
  const __stitch_dep1__ = await include("/star.js");
  const {} = await include("/side.js");
  yield ((descriptors) => (delete descriptors.default, descriptors))(Object.getOwnPropertyDescriptors(__stitch_dep1__));
  console.log(a);
  let b = a;
  yield {b: {get: () => b, set: (v) => b = v, enumerable: true}};
}
"#;
    assert_eq!(code, EcmaCompiler::normalize(expected).unwrap());
  }

  #[test]
  fn default_exports() {
    let (code, _) = lower("export default function () {}", LoaderStrategy::Eager, false);
    let expected = r#"
async function* f() {
  yield {default: {value: function () {}, enumerable: true}};
}
"#;
    assert_eq!(code, EcmaCompiler::normalize(expected).unwrap());

    let (code, _) = lower("export default class Named {}", LoaderStrategy::Eager, false);
    let expected = r#"
async function* f() {
  class Named {}
  yield {default: {get: () => Named, enumerable: true}};
}
"#;
    assert_eq!(code, EcmaCompiler::normalize(expected).unwrap());
  }

  #[test]
  fn bare_modules_keep_only_their_code() {
    let (code, graph) = lower(
      r#"
import { a } from "./dep.js";
export default function named() {}
export const c = include("./dep.js");
export * from "./star.js";
"#,
      LoaderStrategy::Eager,
      true,
    );

    let expected = r#"
async function* f() {
  const {a} = include("/dep.js");
  const {} = include("/star.js");
  function named() {}
  const c = include("/dep.js");
}
"#;
    assert_eq!(code, EcmaCompiler::normalize(expected).unwrap());
    assert_eq!(graph[graph.get("/main.js").unwrap()].exports.len(), 2);
  }

  #[test]
  fn exports_map_names_to_bindings() {
    let (_, graph) = lower(
      r#"
import def, { a as b } from "./dep.js";
export let counter = 0;
export const fixed = 1;
var legacy;
if (fixed) { var nested = 2; }
export { legacy, b as again, nested };
export { x as y } from "./other.js";
export * as ns from "./other.js";
export * from "./third.js";
export default counter + def;
"#,
      LoaderStrategy::Lazy,
      false,
    );

    let main = &graph[graph.get("/main.js").unwrap()];
    let other = ArcStr::from("/other.js");
    let exports =
      main.exports.iter().map(|(name, binding)| (name.as_str(), binding.clone())).collect::<Vec<_>>();
    assert_eq!(
      exports,
      vec![
        ("counter", ExportedBinding::local("counter", true)),
        ("fixed", ExportedBinding::local("fixed", false)),
        ("legacy", ExportedBinding::local("legacy", true)),
        ("again", ExportedBinding::local("b", false)),
        ("nested", ExportedBinding::local("nested", true)),
        (
          "y",
          ExportedBinding::immutable(ExportTarget::Reexport {
            url: other.clone(),
            name: "x".to_string()
          })
        ),
        ("ns", ExportedBinding::immutable(ExportTarget::Namespace { url: other })),
        ("default", ExportedBinding::immutable(ExportTarget::DefaultExpression)),
      ]
    );

    let requires = main.requires.iter().map(|&idx| graph[idx].url.as_str()).collect::<Vec<_>>();
    assert_eq!(requires, ["/dep.js", "/other.js", "/third.js"]);
  }
}
