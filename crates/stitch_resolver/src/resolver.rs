use std::path::Path;

use stitch_utils::concat_string;
use sugar_path::SugarPath;

const SEPARATOR: char = '/';

pub fn is_absolute(specifier: &str) -> bool {
  specifier.starts_with(SEPARATOR)
}

/// Directory part of `url`, including the trailing separator. Empty for a bare file name.
pub fn dirname(url: &str) -> &str {
  url.rfind(SEPARATOR).map_or("", |index| &url[..=index])
}

/// Resolves `specifier` as referenced from the module at `base_url`.
///
/// Absolute specifiers are returned unchanged. Everything else is joined onto the directory of
/// `base_url` with `.` and `..` segments collapsed. Malformed specifiers resolve structurally.
pub fn resolve(base_url: &str, specifier: &str) -> String {
  if is_absolute(specifier) {
    return specifier.to_string();
  }

  normalize(&concat_string!(dirname(base_url), specifier))
}

/// Resolves an entry file against the bundle base so that every url in the output is absolute.
pub fn resolve_entry(base: &str, entry: &str) -> String {
  let base = base.trim_end_matches(SEPARATOR);
  resolve(&concat_string!(base, "/"), entry)
}

fn normalize(path: &str) -> String {
  let normalized = Path::new(path).normalize();
  let normalized = normalized.to_slash_lossy();
  // Windows hosts hand back `\` separators from the path layer.
  if normalized.contains('\\') { normalized.replace('\\', "/") } else { normalized.into_owned() }
}

#[test]
fn absolute_specifiers_pass_through() {
  assert_eq!(resolve("/src/main.js", "/lib/a.js"), "/lib/a.js");
  assert_eq!(resolve("/src/main.js", "/lib/../a.js"), "/lib/../a.js");
}

#[test]
fn relative_specifiers_join_the_importer_directory() {
  assert_eq!(resolve("/src/main.js", "./a.js"), "/src/a.js");
  assert_eq!(resolve("/src/main.js", "a.js"), "/src/a.js");
  assert_eq!(resolve("/src/nested/b.js", "../a.js"), "/src/a.js");
  assert_eq!(resolve("/src/nested/b.js", "./../nested/./c.js"), "/src/nested/c.js");
}

#[test]
fn different_specifiers_meet_on_one_url() {
  let from_root = resolve("/src/main.js", "./lib/util.js");
  let from_nested = resolve("/src/feature/view.js", "../lib/util.js");
  assert_eq!(from_root, from_nested);
}

#[test]
fn entries_become_absolute() {
  assert_eq!(resolve_entry("/", "main.js"), "/main.js");
  assert_eq!(resolve_entry("/static", "./app/main.js"), "/static/app/main.js");
  assert_eq!(resolve_entry("/static/", "/elsewhere.js"), "/elsewhere.js");
}

#[test]
fn dirname_keeps_trailing_separator() {
  assert_eq!(dirname("/a/b.js"), "/a/");
  assert_eq!(dirname("b.js"), "");
}
