use oxc::{
  ast::ast::{BindingPattern, BindingPatternKind},
  span::Atom,
};

pub trait BindingPatternExt<'ast> {
  /// Every name the pattern binds, in source order. Walks object, array, rest and default patterns.
  fn binding_names(&self) -> Vec<Atom<'ast>>;
}

impl<'ast> BindingPatternExt<'ast> for BindingPattern<'ast> {
  fn binding_names(&self) -> Vec<Atom<'ast>> {
    let mut names = vec![];
    collect_names(&self.kind, &mut names);
    names
  }
}

fn collect_names<'ast>(kind: &BindingPatternKind<'ast>, names: &mut Vec<Atom<'ast>>) {
  match kind {
    BindingPatternKind::BindingIdentifier(ident) => names.push(ident.name),
    BindingPatternKind::ObjectPattern(pattern) => {
      for property in &pattern.properties {
        collect_names(&property.value.kind, names);
      }
      if let Some(rest) = &pattern.rest {
        collect_names(&rest.argument.kind, names);
      }
    }
    BindingPatternKind::ArrayPattern(pattern) => {
      for element in pattern.elements.iter().flatten() {
        collect_names(&element.kind, names);
      }
      if let Some(rest) = &pattern.rest {
        collect_names(&rest.argument.kind, names);
      }
    }
    BindingPatternKind::AssignmentPattern(pattern) => collect_names(&pattern.left.kind, names),
  }
}

#[test]
fn collects_nested_destructuring() {
  use oxc::{allocator::Allocator, ast::ast::Statement, span::SourceType};
  use stitch_ecmascript::EcmaCompiler;

  let allocator = Allocator::default();
  let program = EcmaCompiler::parse_program(
    &allocator,
    "/a.js",
    "let {a, b: [c, , d = 1, ...e], ...f} = obj;",
    SourceType::mjs(),
  )
  .unwrap();
  let Statement::VariableDeclaration(decl) = &program.body[0] else { unreachable!() };
  let names = decl.declarations[0].id.binding_names();
  assert_eq!(names.iter().map(Atom::as_str).collect::<Vec<_>>(), ["a", "c", "d", "e", "f"]);
}
