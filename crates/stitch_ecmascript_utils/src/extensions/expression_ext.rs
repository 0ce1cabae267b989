use oxc::ast::ast;

pub trait ExpressionExt<'ast> {
  fn as_string_literal(&self) -> Option<&ast::StringLiteral<'ast>>;

  /// `include` or `window.include`.
  fn is_include_callee(&self) -> bool;
}

impl<'ast> ExpressionExt<'ast> for ast::Expression<'ast> {
  fn as_string_literal(&self) -> Option<&ast::StringLiteral<'ast>> {
    let ast::Expression::StringLiteral(expr) = self else {
      return None;
    };
    Some(expr)
  }

  fn is_include_callee(&self) -> bool {
    match self {
      ast::Expression::Identifier(ident) => ident.name == "include",
      ast::Expression::StaticMemberExpression(member) => {
        member.property.name == "include"
          && matches!(&member.object, ast::Expression::Identifier(object) if object.name == "window")
      }
      _ => false,
    }
  }
}
