use arcstr::ArcStr;
use itertools::Itertools;
use oxc::{
  allocator::Allocator, ast::ast::Program, codegen::Codegen, parser::Parser, span::SourceType,
};
use stitch_error::{BuildResult, BundleError};

use crate::ecma_ast::{
  EcmaAst,
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses a standalone program that owns its own arena.
  pub fn parse(
    url: &str,
    source: impl Into<ArcStr>,
    source_type: SourceType,
  ) -> BuildResult<EcmaAst> {
    let allocator = Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      Self::parse_program(&owner.allocator, url, &owner.source, source_type)
        .map(|program| ProgramCellDependent { program })
    })?;

    Ok(EcmaAst { program, source_type })
  }

  /// Parses `source` into an arena owned by someone else. The text is copied into the arena first,
  /// so the returned program does not borrow `source`.
  pub fn parse_program<'a>(
    allocator: &'a Allocator,
    url: &str,
    source: &str,
    source_type: SourceType,
  ) -> BuildResult<Program<'a>> {
    let source = allocator.alloc_str(source);
    let ret = Parser::new(allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
      let message = ret.errors.iter().map(ToString::to_string).join("\n");
      return Err(BundleError::ParseError { url: url.to_string(), message }.into());
    }
    Ok(ret.program)
  }

  /// Builds a program in a fresh arena. `build` receives the arena that the resulting `EcmaAst`
  /// keeps alive.
  pub fn compose<E>(
    source_type: SourceType,
    build: impl for<'a> FnOnce(&'a Allocator) -> Result<Program<'a>, E>,
  ) -> Result<EcmaAst, E> {
    let owner = ProgramCellOwner { source: ArcStr::new(), allocator: Allocator::default() };
    let program = ProgramCell::try_new(owner, |owner| {
      build(&owner.allocator).map(|program| ProgramCellDependent { program })
    })?;

    Ok(EcmaAst { program, source_type })
  }

  pub fn print(ast: &EcmaAst) -> String {
    Codegen::new().build(ast.program()).code
  }

  /// Parses and prints `source`, giving the canonical rendering of a snippet.
  pub fn normalize(source: &str) -> BuildResult<String> {
    Ok(Self::print(&Self::parse("<inline>", source, SourceType::mjs())?))
  }
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse("/a.js", "const a = 1;", SourceType::mjs()).unwrap();
  assert_eq!(EcmaCompiler::print(&ast), "const a = 1;\n");
}

#[test]
fn parse_errors_name_the_module() {
  let error = EcmaCompiler::parse("/broken.js", "const = ;", SourceType::mjs()).unwrap_err();
  let Some(BundleError::ParseError { url, .. }) = error.bundle_error() else {
    panic!("expected a parse error, got {error:?}");
  };
  assert_eq!(url, "/broken.js");
}

#[test]
fn composed_programs_keep_their_arena() {
  let ast = EcmaCompiler::compose(SourceType::mjs(), |allocator| {
    let mut program = EcmaCompiler::parse_program(allocator, "/a.js", "let a = 1;", SourceType::mjs())?;
    let second =
      EcmaCompiler::parse_program(allocator, "/b.js", "let b = a;", SourceType::mjs())?;
    program.body.extend(second.body);
    Ok::<_, stitch_error::BuildError>(program)
  })
  .unwrap();

  assert_eq!(EcmaCompiler::print(&ast), "let a = 1;\nlet b = a;\n");
  assert!(ast.source().is_empty());
}
