use oxc::{
  allocator::{Allocator, Dummy, IntoIn, Vec as ArenaVec},
  ast::{
    AstBuilder, NONE,
    ast::{self, Argument, ArrayExpressionElement, Expression, Statement},
  },
  span::{Atom, SPAN, SourceType},
};
use stitch_ecmascript::EcmaCompiler;
use stitch_error::BuildResult;

use crate::TemplateFiller;

type PassedStr<'a> = &'a str;

/// Name of the generator that wraps snippets which need `yield`/`await` to parse.
const SNIPPET_HOST: &str = "__stitch_snippet__";

// `AstBuilder` is more suitable name, but it's already used in oxc.
pub struct AstSnippet<'ast> {
  pub builder: AstBuilder<'ast>,
}

impl<'ast> AstSnippet<'ast> {
  pub fn new(alloc: &'ast Allocator) -> Self {
    Self { builder: AstBuilder::new(alloc) }
  }

  #[inline]
  pub fn alloc(&self) -> &'ast Allocator {
    self.builder.allocator
  }

  pub fn atom(&self, value: &str) -> Atom<'ast> {
    self.builder.atom(value)
  }

  #[inline]
  pub fn id_ref_expr(&self, name: PassedStr) -> Expression<'ast> {
    self.builder.expression_identifier(SPAN, self.atom(name))
  }

  pub fn string_literal_expr(&self, value: PassedStr) -> Expression<'ast> {
    Expression::StringLiteral(self.builder.alloc_string_literal(SPAN, self.atom(value), None))
  }

  /// `[object].[property]`
  pub fn literal_prop_access_member_expr_expr(
    &self,
    object: PassedStr,
    property: PassedStr,
  ) -> Expression<'ast> {
    Expression::StaticMemberExpression(self.builder.alloc_static_member_expression(
      SPAN,
      self.id_ref_expr(object),
      self.builder.identifier_name(SPAN, self.atom(property)),
      false,
    ))
  }

  /// `window.include("url")`
  pub fn window_include_call_expr(&self, url: PassedStr) -> Expression<'ast> {
    self.builder.expression_call(
      SPAN,
      self.literal_prop_access_member_expr_expr("window", "include"),
      NONE,
      self.builder.vec1(Argument::from(self.string_literal_expr(url))),
      false,
    )
  }

  #[inline]
  /// `undefined` is acting like identifier, it might be shadowed by user code.
  pub fn void_zero(&self) -> Expression<'ast> {
    self.builder.void_0(SPAN)
  }

  #[inline]
  pub fn expr_stmt(&self, expr: Expression<'ast>) -> Statement<'ast> {
    self.builder.statement_expression(SPAN, expr)
  }

  /// `[...elements]`
  pub fn array_expr(
    &self,
    elements: impl IntoIterator<Item = ArrayExpressionElement<'ast>>,
  ) -> Expression<'ast> {
    let mut array = ast::ArrayExpression::dummy(self.alloc());
    array.elements.extend(elements);
    Expression::ArrayExpression(array.into_in(self.alloc()))
  }

  /// `...argument`
  pub fn spread_element(&self, argument: Expression<'ast>) -> ArrayExpressionElement<'ast> {
    ArrayExpressionElement::SpreadElement(self.builder.alloc_spread_element(SPAN, argument))
  }

  /// Parses generated top-level code into this arena.
  pub fn statements(&self, code: &str) -> BuildResult<ArenaVec<'ast, Statement<'ast>>> {
    let program = EcmaCompiler::parse_program(self.alloc(), SNIPPET_HOST, code, SourceType::mjs())?;
    Ok(program.body)
  }

  /// Parses generated code that only makes sense inside a generator body, e.g. `yield {..}` or
  /// `await include(..)`, and returns the statements of that body.
  pub fn generator_statements(&self, code: &str) -> BuildResult<ArenaVec<'ast, Statement<'ast>>> {
    let host = concat_host(code);
    let mut body = self.statements(&host)?;
    let statements = body.iter_mut().find_map(|stmt| match stmt {
      Statement::FunctionDeclaration(func) => func.body.as_mut().map(|body| {
        std::mem::replace(&mut body.statements, self.builder.vec())
      }),
      _ => None,
    });
    Ok(statements.unwrap_or_else(|| self.builder.vec()))
  }

  /// Like [`Self::generator_statements`], then substitutes `placeholder` with `expr`.
  pub fn generator_statements_with(
    &self,
    code: &str,
    placeholder: &'static str,
    expr: Expression<'ast>,
  ) -> BuildResult<ArenaVec<'ast, Statement<'ast>>> {
    let mut statements = self.generator_statements(code)?;
    TemplateFiller::with_expression(placeholder, expr).fill_statements(&mut statements);
    Ok(statements)
  }
}

fn concat_host(code: &str) -> String {
  stitch_utils::concat_string!("async function* ", SNIPPET_HOST, "() {\n", code, "\n}")
}

#[cfg(test)]
mod tests {
  use oxc::{allocator::Allocator, ast::ast::Statement, codegen::Codegen, span::SourceType};
  use stitch_ecmascript::EcmaCompiler;

  use super::AstSnippet;
  use crate::TemplateFiller;

  fn render<'a>(allocator: &'a Allocator, statements: oxc::allocator::Vec<'a, Statement<'a>>) -> String {
    let mut program =
      EcmaCompiler::parse_program(allocator, "<test>", "", SourceType::mjs()).unwrap();
    program.body = statements;
    Codegen::new().build(&program).code
  }

  #[test]
  fn window_include_call() {
    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let stmt = snippet.expr_stmt(snippet.window_include_call_expr("/a.js"));
    assert_eq!(render(&allocator, snippet.builder.vec1(stmt)), "window.include(\"/a.js\");\n");
  }

  #[test]
  fn generator_statements_unwrap_the_host() {
    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let statements = snippet.generator_statements("yield 1;\nawait x;").unwrap();
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[0], Statement::ExpressionStatement(_)));
  }

  #[test]
  fn placeholder_is_substituted() {
    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let statements = snippet
      .generator_statements_with("yield {value: $$};", "$$", snippet.string_literal_expr("v"))
      .unwrap();
    let code = render(&allocator, statements);
    assert!(code.contains("value: \"v\""), "{code}");
  }

  #[test]
  fn bodies_are_spliced_after_directives() {
    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let mut statements = snippet.statements(r#"function* f() { "use strict"; }"#).unwrap();
    let body = snippet.generator_statements("yield 1;").unwrap();
    TemplateFiller::with_body(body).fill_statements(&mut statements);

    let Statement::FunctionDeclaration(func) = &statements[0] else {
      panic!("expected a function declaration");
    };
    let body = func.body.as_ref().unwrap();
    assert_eq!(body.directives.len(), 1);
    assert_eq!(body.statements.len(), 1);
  }
}
