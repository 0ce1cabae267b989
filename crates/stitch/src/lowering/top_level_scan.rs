use oxc::{
  ast::ast::{
    ArrowFunctionExpression, AwaitExpression, Declaration, ForOfStatement, Function, Statement,
    StaticBlock, VariableDeclaration, VariableDeclarationKind,
  },
  ast_visit::{Visit, walk},
  semantic::ScopeFlags,
};
use rustc_hash::FxHashSet;
use stitch_ecmascript_utils::{BindingPatternExt, DeclarationExt};

/// What the module scope of a body looks like before any statement is lowered.
///
/// Function bodies and class static blocks have their own scope and are not entered.
#[derive(Debug, Default)]
pub struct TopLevelScan<'ast> {
  /// Names a `set` accessor may write: top-level `let`/`var`, plus `var`s nested in blocks.
  pub mutable_bindings: FxHashSet<&'ast str>,
  /// `await`, `for await` or `await using` evaluated by the module body itself.
  pub has_await: bool,
}

impl<'ast> TopLevelScan<'ast> {
  pub fn new(body: &[Statement<'ast>]) -> Self {
    let mut scan = Self::default();
    for stmt in body {
      let declaration = match stmt {
        Statement::ExportNamedDeclaration(decl) => decl.declaration.as_ref(),
        stmt => stmt.as_declaration(),
      };
      if let Some(declaration) = declaration.filter(|decl| is_top_level_let(decl)) {
        let names = declaration.declared_names();
        scan.mutable_bindings.extend(names.iter().map(|name| name.as_str()));
      }
      scan.visit_statement(stmt);
    }
    scan
  }
}

fn is_top_level_let(decl: &Declaration) -> bool {
  matches!(decl, Declaration::VariableDeclaration(var) if var.kind == VariableDeclarationKind::Let)
}

impl<'ast> Visit<'ast> for TopLevelScan<'ast> {
  fn visit_variable_declaration(&mut self, it: &VariableDeclaration<'ast>) {
    match it.kind {
      VariableDeclarationKind::Var => {
        for declarator in &it.declarations {
          let names = declarator.id.binding_names();
          self.mutable_bindings.extend(names.iter().map(|name| name.as_str()));
        }
      }
      VariableDeclarationKind::AwaitUsing => self.has_await = true,
      _ => {}
    }
    walk::walk_variable_declaration(self, it);
  }

  fn visit_await_expression(&mut self, _it: &AwaitExpression<'ast>) {
    self.has_await = true;
  }

  fn visit_for_of_statement(&mut self, it: &ForOfStatement<'ast>) {
    self.has_await |= it.r#await;
    walk::walk_for_of_statement(self, it);
  }

  fn visit_function(&mut self, _it: &Function<'ast>, _flags: ScopeFlags) {}

  fn visit_arrow_function_expression(&mut self, _it: &ArrowFunctionExpression<'ast>) {}

  fn visit_static_block(&mut self, _it: &StaticBlock<'ast>) {}
}
