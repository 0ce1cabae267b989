//! Text of the statements lowering emits. Every piece is parsed back into the bundle arena through
//! `AstSnippet::generator_statements`, so it may use `yield` and `await` freely.

use itertools::Itertools;
use stitch_common::LoaderStrategy;
use stitch_utils::{
  concat_string,
  ecmascript::{property_access_str, quote_str, to_property_key},
};

/// Stands in for the expression of `export default <expression>` until it is spliced in.
pub const DEFAULT_PLACEHOLDER: &str = "__stitch_default__";

/// Loads a dependency from inside a module thunk.
pub fn include_call(strategy: LoaderStrategy, url: &str) -> String {
  match strategy {
    LoaderStrategy::Eager => concat_string!("include(", quote_str(url), ")"),
    LoaderStrategy::Lazy => concat_string!("await include(", quote_str(url), ")"),
  }
}

/// A property descriptor published under `name`.
pub enum Descriptor<'a> {
  /// Reads `local` through a getter. `writable` adds a setter.
  Binding { local: &'a str, writable: bool },
  /// Reads `expr` lazily through a getter.
  Getter(String),
  /// Fixed value.
  Value(String),
}

impl Descriptor<'_> {
  fn render(&self) -> String {
    match self {
      Self::Binding { local, writable: true } => {
        let param = if *local == "v" { "value" } else { "v" };
        concat_string!(
          "{get: () => ",
          local,
          ", set: (",
          param,
          ") => ",
          local,
          " = ",
          param,
          ", enumerable: true}"
        )
      }
      Self::Binding { local, writable: false } => {
        concat_string!("{get: () => ", local, ", enumerable: true}")
      }
      Self::Getter(expr) => concat_string!("{get: () => ", expr, ", enumerable: true}"),
      Self::Value(expr) => concat_string!("{value: ", expr, ", enumerable: true}"),
    }
  }
}

/// `yield {name: descriptor, ..};`
pub fn publish<'a>(descriptors: impl IntoIterator<Item = (&'a str, Descriptor<'a>)>) -> String {
  let properties = descriptors
    .into_iter()
    .map(|(name, descriptor)| concat_string!(to_property_key(name), ": ", descriptor.render()))
    .join(", ");
  concat_string!("yield {", properties, "};")
}

/// Getter of `export { name } from "url"`, reading the bound exports object of `url`.
pub fn reexport_getter(dependency: &str, name: &str) -> Descriptor<'static> {
  Descriptor::Getter(property_access_str(dependency, name))
}

/// `export * from "url"`: every export of the bound `dependency` except `default`.
pub fn star_passthrough(dependency: &str) -> String {
  concat_string!(
    "yield ((descriptors) => (delete descriptors.default, descriptors))(Object.getOwnPropertyDescriptors(",
    dependency,
    "));"
  )
}

#[test]
fn include_forms_follow_the_strategy() {
  assert_eq!(include_call(LoaderStrategy::Eager, "/a.js"), r#"include("/a.js")"#);
  assert_eq!(include_call(LoaderStrategy::Lazy, "/a.js"), r#"await include("/a.js")"#);
}

#[test]
fn descriptors() {
  assert_eq!(
    publish([
      ("a", Descriptor::Binding { local: "a", writable: true }),
      ("b-c", Descriptor::Binding { local: "v", writable: true }),
      ("d", Descriptor::Binding { local: "d", writable: false }),
    ]),
    concat_string!(
      "yield {a: {get: () => a, set: (v) => a = v, enumerable: true}, ",
      r#""b-c": {get: () => v, set: (value) => v = value, enumerable: true}, "#,
      "d: {get: () => d, enumerable: true}};"
    )
  );
  assert_eq!(
    publish([
      ("x", reexport_getter("__stitch_dep0__", "y")),
      ("z", reexport_getter("__stitch_dep1__", "a-b")),
    ]),
    concat_string!(
      "yield {x: {get: () => __stitch_dep0__.y, enumerable: true}, ",
      r#"z: {get: () => __stitch_dep1__["a-b"], enumerable: true}};"#
    )
  );
}
