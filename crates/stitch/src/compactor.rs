use oxc::{
  allocator::{TakeIn, Vec as ArenaVec},
  ast::ast::{
    ArrayExpressionElement, Expression, Statement, VariableDeclarationKind, YieldExpression,
  },
  span::SPAN,
};
use stitch_ecmascript_utils::AstSnippet;

/// Merges adjacent statements that can share one statement.
///
/// - `const a = 1; const b = 2;` becomes `const a = 1, b = 2;`, likewise for `let` and `var`.
/// - `yield a; yield* b;` becomes `yield* [a, ...b];`.
/// - `f(), yield a; yield b;` becomes `f(), yield* [a, b];`.
///
/// Everything else is kept apart, including `using` and `declare` declarations.
pub fn compact<'ast>(
  snippet: &AstSnippet<'ast>,
  statements: ArenaVec<'ast, Statement<'ast>>,
) -> ArenaVec<'ast, Statement<'ast>> {
  let mut compacted = snippet.builder.vec_with_capacity(statements.len());
  for stmt in statements {
    let stmt = match compacted.last_mut() {
      Some(prev) => match merge_into(snippet, prev, stmt) {
        Ok(()) => continue,
        Err(stmt) => stmt,
      },
      None => stmt,
    };
    compacted.push(stmt);
  }
  compacted
}

/// Moves `next` into `prev`, or hands it back when the two don't merge.
fn merge_into<'ast>(
  snippet: &AstSnippet<'ast>,
  prev: &mut Statement<'ast>,
  next: Statement<'ast>,
) -> Result<(), Statement<'ast>> {
  if !can_merge(prev, &next) {
    return Err(next);
  }

  let alloc = snippet.alloc();
  match (prev, next) {
    (Statement::VariableDeclaration(prev), Statement::VariableDeclaration(mut next)) => {
      prev.declarations.extend(next.declarations.take_in(alloc));
    }
    (Statement::ExpressionStatement(prev), Statement::ExpressionStatement(mut next)) => {
      let Some(last) = trailing_yield(&mut prev.expression) else {
        return Err(Statement::ExpressionStatement(next));
      };
      let mut values = vec![];
      for expr in [last.take_in(alloc), next.expression.take_in(alloc)] {
        if let Expression::YieldExpression(yield_expr) = expr {
          collect_yielded(snippet, yield_expr.unbox(), &mut values);
        }
      }
      *last = snippet.builder.expression_yield(SPAN, true, Some(snippet.array_expr(values)));
    }
    _ => {}
  }
  Ok(())
}

fn can_merge(prev: &Statement, next: &Statement) -> bool {
  match (prev, next) {
    (Statement::VariableDeclaration(prev), Statement::VariableDeclaration(next)) => {
      prev.kind == next.kind && is_mergeable_kind(prev.kind) && !prev.declare && !next.declare
    }
    (Statement::ExpressionStatement(prev), Statement::ExpressionStatement(next)) => {
      ends_with_yield(&prev.expression)
        && matches!(next.expression, Expression::YieldExpression(_))
    }
    _ => false,
  }
}

fn is_mergeable_kind(kind: VariableDeclarationKind) -> bool {
  matches!(
    kind,
    VariableDeclarationKind::Var | VariableDeclarationKind::Let | VariableDeclarationKind::Const
  )
}

/// `yield a`, or a sequence whose last expression is one. A sequence on the `next` side would run
/// its leading expressions after the previous yield, so only `prev` may be one.
fn ends_with_yield(expr: &Expression) -> bool {
  match expr {
    Expression::YieldExpression(_) => true,
    Expression::SequenceExpression(seq) => seq.expressions.last().is_some_and(ends_with_yield),
    Expression::ParenthesizedExpression(paren) => ends_with_yield(&paren.expression),
    _ => false,
  }
}

fn trailing_yield<'a, 'ast>(expr: &'a mut Expression<'ast>) -> Option<&'a mut Expression<'ast>> {
  if matches!(expr, Expression::YieldExpression(_)) {
    return Some(expr);
  }
  match expr {
    Expression::SequenceExpression(seq) => seq.expressions.last_mut().and_then(trailing_yield),
    Expression::ParenthesizedExpression(paren) => trailing_yield(&mut paren.expression),
    _ => None,
  }
}

/// Values a single `yield` hands to the consumer, as array elements.
fn collect_yielded<'ast>(
  snippet: &AstSnippet<'ast>,
  yield_expr: YieldExpression<'ast>,
  values: &mut Vec<ArrayExpressionElement<'ast>>,
) {
  match (yield_expr.delegate, yield_expr.argument) {
    (true, Some(Expression::ArrayExpression(array))) => values.extend(array.unbox().elements),
    (true, Some(iterable)) => values.push(snippet.spread_element(iterable)),
    (false, Some(value)) => values.push(ArrayExpressionElement::from(value)),
    (_, None) => values.push(ArrayExpressionElement::from(snippet.void_zero())),
  }
}
