use arcstr::ArcStr;

/// Where an exported name reads its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
  /// A top-level binding of the exporting module.
  Local(String),
  /// The value of a `export default <expression>`.
  DefaultExpression,
  /// A named export of another module, `export { name } from "url"`.
  Reexport { url: ArcStr, name: String },
  /// The whole exports object of another module, `export * as ns from "url"`.
  Namespace { url: ArcStr },
}

/// One entry of a module's binding mapping, keyed by the external name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedBinding {
  pub target: ExportTarget,
  /// Whether importers observe writes through a setter, true for `let`/`var` bindings.
  pub mutable: bool,
}

impl ExportedBinding {
  pub fn local(name: impl Into<String>, mutable: bool) -> Self {
    Self { target: ExportTarget::Local(name.into()), mutable }
  }

  pub fn immutable(target: ExportTarget) -> Self {
    Self { target, mutable: false }
  }
}
