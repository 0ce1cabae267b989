use itertools::Itertools;
use stitch_common::{BundlerOptions, NormalizedBundlerOptions};
use stitch_utils::concat_string;
use sugar_path::SugarPath;

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  let cwd = raw_options.cwd.unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
  let root = raw_options.root.map_or_else(|| cwd.clone(), |root| cwd.join(root).normalize());

  NormalizedBundlerOptions {
    input: raw_options.input.unwrap_or_default().into_iter().unique().collect(),
    base: normalize_base(raw_options.base.as_deref().unwrap_or("/")),
    external: raw_options.external.unwrap_or_default(),
    file: raw_options.file,
    loader: raw_options.loader.unwrap_or_default(),
    bare: raw_options.bare.unwrap_or(false),
    root,
    cwd,
  }
}

/// `static/js/` -> `/static/js`, `` -> `/`
fn normalize_base(base: &str) -> String {
  let trimmed = base.trim_matches('/');
  if trimmed.is_empty() { "/".to_string() } else { concat_string!("/", trimmed) }
}

#[test]
fn defaults() {
  let options = normalize_options(BundlerOptions {
    cwd: Some(std::path::PathBuf::from("/project")),
    ..Default::default()
  });

  assert!(options.input.is_empty());
  assert_eq!(options.root, std::path::PathBuf::from("/project"));
  assert_eq!(options.base, "/");
  assert_eq!(options.loader, stitch_common::LoaderStrategy::Lazy);
  assert!(!options.bare);
  assert!(options.external.is_empty());
}

#[test]
fn input_is_deduplicated_in_order() {
  let options = normalize_options(BundlerOptions {
    input: Some(vec!["b.js".into(), "a.js".into(), "b.js".into()]),
    root: Some(std::path::PathBuf::from("public/../www")),
    cwd: Some(std::path::PathBuf::from("/project")),
    ..Default::default()
  });

  assert_eq!(options.input, vec!["b.js".into(), "a.js".into()]);
  assert_eq!(options.root, std::path::PathBuf::from("/project/www"));
}

#[test]
fn base_has_one_leading_slash() {
  assert_eq!(normalize_base("static/js/"), "/static/js");
  assert_eq!(normalize_base("/static"), "/static");
  assert_eq!(normalize_base("//"), "/");
  assert_eq!(normalize_base(""), "/");
}
