use std::path::PathBuf;

use crate::{InputItem, LoaderStrategy};

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  pub root: PathBuf,
  /// Always starts with `/` and never ends with one, except for the root itself.
  pub base: String,
  pub external: Vec<String>,

  // --- Output
  pub file: Option<String>,
  pub loader: LoaderStrategy,
  pub bare: bool,
}

impl NormalizedBundlerOptions {
  pub fn is_external(&self, url: &str) -> bool {
    self.external.iter().any(|prefix| url.starts_with(prefix.as_str()))
  }
}
