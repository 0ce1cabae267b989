use itertools::Itertools;
use stitch_utils::{concat_string, ecmascript::to_property_key};

/// Every binding one module imports from one url.
#[derive(Debug, Default)]
pub struct ImportGroup {
  /// Hidden local holding the whole namespace, read by re-exports.
  binding: Option<String>,
  namespaces: Vec<String>,
  /// (imported, local)
  named: Vec<(String, String)>,
}

impl ImportGroup {
  pub fn add_named(&mut self, imported: impl Into<String>, local: impl Into<String>) {
    self.named.push((imported.into(), local.into()));
  }

  pub fn add_namespace(&mut self, local: impl Into<String>) {
    self.namespaces.push(local.into());
  }

  /// Names the exports object of the dependency. `index` keeps the name unique per module.
  pub fn bind(&mut self, index: usize) -> &str {
    self.binding.get_or_insert_with(|| format!("__stitch_dep{index}__"))
  }

  /// One `const` declaration that evaluates `include` exactly once.
  ///
  /// - `const {a, default: b} = include(..);`
  /// - `const {...ns} = include(..), {a} = ns, other = ns;`
  /// - `const __stitch_dep0__ = include(..), {a} = __stitch_dep0__;` once bound.
  /// - `const {} = include(..);` for side effects only.
  pub fn render(&self, include: &str) -> String {
    let mut declarators = vec![];
    let mut source = include;
    if let Some(binding) = &self.binding {
      declarators.push(concat_string!(binding, " = ", include));
      source = binding.as_str();
    }

    if let Some((namespace, aliases)) = self.namespaces.split_first() {
      declarators.push(concat_string!("{...", namespace, "} = ", source));
      if !self.named.is_empty() {
        declarators.push(concat_string!(self.object_pattern(), " = ", namespace));
      }
      declarators.extend(aliases.iter().map(|alias| concat_string!(alias, " = ", namespace)));
    } else if !self.named.is_empty() || declarators.is_empty() {
      declarators.push(concat_string!(self.object_pattern(), " = ", source));
    }
    concat_string!("const ", declarators.join(", "), ";")
  }

  fn object_pattern(&self) -> String {
    let properties = self
      .named
      .iter()
      .map(|(imported, local)| {
        if imported == local {
          local.clone()
        } else {
          concat_string!(to_property_key(imported), ": ", local)
        }
      })
      .join(", ");
    concat_string!("{", properties, "}")
  }
}

#[test]
fn named_and_default_imports() {
  let mut group = ImportGroup::default();
  group.add_named("default", "a");
  group.add_named("b", "c");
  group.add_named("d", "d");
  group.add_named("e f", "g");

  assert_eq!(
    group.render(r#"include("/x.js")"#),
    r#"const {default: a, b: c, d, "e f": g} = include("/x.js");"#
  );
}

#[test]
fn namespace_imports_share_one_include() {
  let mut group = ImportGroup::default();
  group.add_namespace("ns");
  group.add_named("default", "a");
  group.add_namespace("again");

  assert_eq!(
    group.render(r#"await include("/x.js")"#),
    r#"const {...ns} = await include("/x.js"), {default: a} = ns, again = ns;"#
  );
}

#[test]
fn side_effect_import() {
  assert_eq!(ImportGroup::default().render(r#"include("/x.js")"#), r#"const {} = include("/x.js");"#);
}

#[test]
fn bound_dependencies_are_included_once() {
  let mut group = ImportGroup::default();
  assert_eq!(group.bind(2), "__stitch_dep2__");
  assert_eq!(
    group.render(r#"await include("/x.js")"#),
    r#"const __stitch_dep2__ = await include("/x.js");"#
  );

  group.add_named("a", "a");
  group.add_namespace("ns");
  assert_eq!(group.bind(5), "__stitch_dep2__");
  assert_eq!(
    group.render(r#"await include("/x.js")"#),
    r#"const __stitch_dep2__ = await include("/x.js"), {...ns} = __stitch_dep2__, {a} = ns;"#
  );
}
