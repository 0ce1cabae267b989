pub mod input_item;
pub mod loader_strategy;
pub mod normalized_bundler_options;

use std::path::PathBuf;

use serde::Deserialize;

use crate::{InputItem, LoaderStrategy};

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,
  /// Directory the filesystem loader maps the url `/` to.
  pub root: Option<PathBuf>,
  /// Url directory the entries live in.
  pub base: Option<String>,
  /// Url prefixes that are left to the runtime instead of being bundled.
  pub external: Option<Vec<String>>,

  // --- Output
  pub file: Option<String>,
  pub loader: Option<LoaderStrategy>,
  /// Drop export publication, for scripts consumed only for their side effects.
  pub bare: Option<bool>,
}

#[test]
fn deserialize_from_json() {
  let options: BundlerOptions = serde_json::from_str(
    r#"{ "input": ["main.js", "worker.js"], "loader": "eager", "bare": true, "external": ["/vendor/"] }"#,
  )
  .unwrap();

  assert_eq!(options.input, Some(vec![InputItem::from("main.js"), InputItem::from("worker.js")]));
  assert_eq!(options.loader, Some(LoaderStrategy::Eager));
  assert_eq!(options.bare, Some(true));
  assert_eq!(options.external.as_deref(), Some(&["/vendor/".to_string()][..]));
  assert!(options.base.is_none());
}

#[test]
fn unknown_fields_are_rejected() {
  assert!(serde_json::from_str::<BundlerOptions>(r#"{ "format": "cjs" }"#).is_err());
}
