use oxc::{
  allocator::Vec as ArenaVec,
  ast::ast::{Expression, FunctionBody, Statement},
  ast_visit::{VisitMut, walk_mut},
};

/// Splices nodes into a parsed template.
///
/// - The first identifier reference named `placeholder` is replaced by `expression`.
/// - The first function body without statements receives `body`. Its directives stay in front.
pub struct TemplateFiller<'ast> {
  placeholder: &'static str,
  expression: Option<Expression<'ast>>,
  body: Option<ArenaVec<'ast, Statement<'ast>>>,
}

impl<'ast> TemplateFiller<'ast> {
  pub fn with_expression(placeholder: &'static str, expression: Expression<'ast>) -> Self {
    Self { placeholder, expression: Some(expression), body: None }
  }

  pub fn with_body(body: ArenaVec<'ast, Statement<'ast>>) -> Self {
    Self { placeholder: "", expression: None, body: Some(body) }
  }

  pub fn fill_statements(mut self, statements: &mut ArenaVec<'ast, Statement<'ast>>) {
    for stmt in statements.iter_mut() {
      if self.is_done() {
        break;
      }
      self.visit_statement(stmt);
    }
  }

  pub fn is_done(&self) -> bool {
    self.expression.is_none() && self.body.is_none()
  }
}

impl<'ast> VisitMut<'ast> for TemplateFiller<'ast> {
  fn visit_expression(&mut self, it: &mut Expression<'ast>) {
    if let Expression::Identifier(ident) = it {
      if ident.name == self.placeholder {
        if let Some(expression) = self.expression.take() {
          *it = expression;
          return;
        }
      }
    }
    walk_mut::walk_expression(self, it);
  }

  fn visit_function_body(&mut self, it: &mut FunctionBody<'ast>) {
    if it.statements.is_empty() {
      if let Some(body) = self.body.take() {
        it.statements = body;
        return;
      }
    }
    walk_mut::walk_function_body(self, it);
  }
}
