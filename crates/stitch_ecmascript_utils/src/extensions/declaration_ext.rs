use oxc::{
  ast::ast::{Declaration, VariableDeclarationKind},
  span::Atom,
};

use crate::BindingPatternExt;

pub trait DeclarationExt<'ast> {
  /// Names introduced by the declaration. TypeScript-only declarations bind nothing at runtime.
  fn declared_names(&self) -> Vec<Atom<'ast>>;

  /// `let` and `var` bindings can be reassigned from the outside through a live binding.
  fn is_mutable_binding(&self) -> bool;
}

impl<'ast> DeclarationExt<'ast> for Declaration<'ast> {
  fn declared_names(&self) -> Vec<Atom<'ast>> {
    match self {
      Declaration::VariableDeclaration(decl) => {
        decl.declarations.iter().flat_map(|declarator| declarator.id.binding_names()).collect()
      }
      Declaration::FunctionDeclaration(func) => func.id.iter().map(|id| id.name).collect(),
      Declaration::ClassDeclaration(class) => class.id.iter().map(|id| id.name).collect(),
      _ => vec![],
    }
  }

  fn is_mutable_binding(&self) -> bool {
    matches!(
      self,
      Declaration::VariableDeclaration(decl)
        if matches!(decl.kind, VariableDeclarationKind::Let | VariableDeclarationKind::Var)
    )
  }
}
